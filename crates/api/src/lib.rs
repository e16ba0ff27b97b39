//! Public error taxonomy and shared contracts for the eidcrypt workspace
//!
//! Every crate in the workspace reports failures through [`Error`], so
//! callers of the EC, cipher and HSM layers only ever match on one type.
//! The [`traits`] module holds the contracts that applications implement
//! and hand to the core, such as the cluster lock predicate.

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, ResultExt};
pub use traits::{KeyLockOracle, SingleInstance};
