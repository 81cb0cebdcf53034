mod dyn_vec;
mod iter;

pub use dyn_vec::{DynVec, FixedVec};
pub use iter::{Iter, IterMut, IntoIter};

pub type Result<T> = core::result::Result<T, crate::CapacityError>;
