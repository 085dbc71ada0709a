/// Defines an index new-type together with a vector that can only be indexed by it.
///
/// Used for dense ids that live next to plain vertex indices (component ids in the
/// SCC partition), so the two can't be mixed up at an indexing site.
#[macro_export]
macro_rules! define_indexed_vec {
    (
        $(#[$idx_meta:meta])*
        $idx_vis:vis struct $Idx:ident ;

        $(#[$vec_meta:meta])*
        $vec_vis:vis struct $Vec:ident ;
    ) => {
        // index new-type

        $(#[$idx_meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $idx_vis struct $Idx(pub usize);

        impl ::std::convert::From<usize> for $Idx {
            fn from(value: usize) -> Self {
                $Idx(value)
            }
        }

        impl ::std::convert::From<$Idx> for usize {
            fn from(value: $Idx) -> Self {
                value.0
            }
        }

        impl ::std::fmt::Display for $Idx {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        // vector new-type

        $(#[$vec_meta])*
        #[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vec_vis struct $Vec<T>(::std::vec::Vec<T>);

        impl<T> ::std::ops::Index<$Idx> for $Vec<T> {
            type Output = T;
            #[inline] fn index(&self, i: $Idx) -> &Self::Output { &self.0[i.0] }
        }
        impl<T> ::std::ops::IndexMut<$Idx> for $Vec<T> {
            #[inline] fn index_mut(&mut self, i: $Idx) -> &mut Self::Output { &mut self.0[i.0] }
        }

        impl<T> $Vec<T> {
            #[inline] pub fn new() -> Self { Self(::std::vec::Vec::new()) }
            #[inline] pub fn with_capacity(c: usize) -> Self {
                Self(::std::vec::Vec::with_capacity(c))
            }

            #[inline] pub fn len(&self) -> usize { self.0.len() }
            #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

            /// Pushes a value and returns the index it was stored at.
            #[inline] pub fn push(&mut self, value: T) -> $Idx {
                self.0.push(value);
                $Idx(self.0.len() - 1)
            }

            #[inline] pub fn get(&self, idx: $Idx) -> Option<&T> { self.0.get(idx.0) }

            #[inline] pub fn iter<'a>(
                &'a self,
            ) -> ::std::iter::Map<
                ::std::iter::Enumerate<::std::slice::Iter<'a, T>>,
                fn((usize, &T)) -> ($Idx, &T),
            > {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }

            #[inline] pub fn iter_ids(&self) -> impl Iterator<Item = $Idx> {
                (0..self.0.len()).map($Idx)
            }

            #[inline] pub fn raw(&self) -> &::std::vec::Vec<T> { &self.0 }
        }

        impl<T: Clone> $Vec<T> {
            #[inline] pub fn filled(value: T, len: usize) -> Self { Self(::std::vec![value; len]) }
        }

        impl<T> ::std::convert::From<::std::vec::Vec<T>> for $Vec<T> {
            fn from(v: ::std::vec::Vec<T>) -> Self { Self(v) }
        }

        impl<T> ::std::iter::FromIterator<T> for $Vec<T> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl<'a, T> IntoIterator for &'a $Vec<T> {
            type Item = ($Idx, &'a T);
            type IntoIter = ::std::iter::Map<
                ::std::iter::Enumerate<::std::slice::Iter<'a, T>>,
                fn((usize, &T)) -> ($Idx, &T),
            >;
            fn into_iter(self) -> Self::IntoIter { self.iter() }
        }
    };
}

#[cfg(test)]
mod test {
    define_indexed_vec!(
        struct Slot;
        struct SlotVec;
    );

    #[test]
    fn push_returns_typed_index() {
        let mut v = SlotVec::new();
        let a = v.push("a");
        let b = v.push("b");
        assert_eq!(a, Slot(0));
        assert_eq!(b, Slot(1));
        assert_eq!(v[b], "b");
        assert_eq!(v.iter_ids().collect::<Vec<_>>(), vec![Slot(0), Slot(1)]);
    }

    #[test]
    fn filled_and_collected() {
        let mut v = SlotVec::filled(0usize, 3);
        v[Slot(2)] += 5;
        let doubled: SlotVec<usize> = v.iter().map(|(_, x)| x * 2).collect();
        assert_eq!(doubled.raw(), &vec![0, 0, 10]);
    }
}
