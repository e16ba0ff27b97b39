//! Constants for elliptic-curve cryptography and algorithm identifiers

pub mod curves;
pub mod oids;
