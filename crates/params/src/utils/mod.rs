//! Size constants shared by the primitive implementations

pub mod hash;
pub mod symmetric;
