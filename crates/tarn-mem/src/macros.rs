#[macro_export]
macro_rules! const_assert {
    ($check:expr $(,$msg:tt)*) => {
        const _: () = assert!($check $(,$msg)*);
    };
}

#[macro_export]
macro_rules! size_of {
    ($t:ty) => {
        ::core::mem::size_of::<$t>()
    };
}

/// Builds a [`DynVec`](crate::DynVec) from a list of elements or from
/// `value; n`, like `vec!`.
///
/// Panics if the allocation fails.
#[macro_export]
macro_rules! dyn_vec {
    () => (
        <$crate::DynVec<_>>::new()
    );
    ($value:expr; $n:expr) => (
        <$crate::DynVec<_>>::from_elem($value, $n)
    );
    [$($elem:expr),+ $(,)?] => {
        <$crate::DynVec<_> as ::core::iter::FromIterator<_>>::from_iter([$($elem),+])
    };
}
