//! Message authentication codes

pub mod cmac;

pub use cmac::Cmac;
