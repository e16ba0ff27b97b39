//! Block cipher modes of operation
//!
//! Both modes work on whole blocks only; padding is the caller's business
//! (secure messaging applies ISO/IEC 9797-1 method 2 padding itself).

pub mod cbc;
pub mod ecb;

// Re-exports
pub use cbc::Cbc;
pub use ecb::Ecb;
