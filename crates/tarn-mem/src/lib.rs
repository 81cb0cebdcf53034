//! Growable contiguous arrays over manually managed storage.
//!
//! [`RawBlock`] owns uninitialized slots and nothing more. [`DynVec`]
//! builds on one block and decides when slots are constructed, dropped and
//! migrated, keeping its previous state whenever a growth path fails.

#[macro_use]
mod macros;

pub mod capacity_policy;
pub mod raw_block;
pub mod vec_types;

mod errors;

pub use errors::CapacityError;
pub use capacity_policy::{CapacityPolicy, Doubling, Fixed};
pub use raw_block::RawBlock;
pub use vec_types::{DynVec, FixedVec, Iter, IterMut, IntoIter};
