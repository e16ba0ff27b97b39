//! Constant values for eidcrypt
//!
//! Curve tables, object identifiers and size constants used across the
//! workspace. The crate has no dependencies and no runtime behavior beyond
//! table lookups.

pub mod traditional;
pub mod utils;

#[cfg(test)]
mod tests;
