/// Decides how a [`DynVec`](crate::DynVec) grows once its storage is full.
pub trait CapacityPolicy {
    fn can_grow() -> bool;
    /// Capacity to grow to from `current`, or `None` if it would overflow.
    fn grow(current: usize) -> Option<usize>;
}

/// Doubles the capacity, starting from a single slot.
pub struct Doubling {}

impl CapacityPolicy for Doubling {

    #[inline]
    fn can_grow() -> bool {
        true
    }

    #[inline]
    fn grow(current: usize) -> Option<usize> {
        if current == 0 { Some(1) }
        else { current.checked_mul(2) }
    }
}

/// Never grows implicitly; the capacity is chosen at construction.
pub struct Fixed {}

impl CapacityPolicy for Fixed {

    #[inline]
    fn can_grow() -> bool {
        false
    }

    #[inline]
    fn grow(_: usize) -> Option<usize> {
        None
    }
}
