//! Cryptographic primitives for eID Extended Access Control
//!
//! This crate provides the pieces the EAC protocol family needs below the
//! key-management layer:
//!
//! - Elliptic-curve arithmetic, ECDSA and ECDH over arbitrary prime curves
//! - Domain-parameter reconstruction from card and certificate structures
//! - AES with ECB and CBC modes, AES-CMAC and the secure-messaging KDF
//! - A small DER/BER-TLV codec and the signature algorithm registry
//!
//! EC routines work on public protocol data and are not constant time.
//! Secret key material is zeroized on drop.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// ASN.1 codec
pub mod asn1;
pub use asn1::{AlgorithmIdentifier, Oid, Tlv};

// Digests
pub mod hash;
pub use hash::DigestAlgorithm;

// Block cipher and modes
pub mod block;
pub use block::{Aes, BlockCipher, Cbc, Ecb};

// MAC implementations
pub mod mac;
pub use mac::Cmac;

// Secure-messaging primitives
pub mod cipher;
pub use cipher::{cmac, cmac_with_iv, decipher_aes, encipher_aes, SecretKey};

pub mod kdf;
pub use kdf::AesKdf;

pub mod sm;
pub use sm::{AesKeyMaterial, SendSequenceCounter};

// Algorithm identifiers
pub mod registry;
pub use registry::{SignatureAlgorithm, SignatureKind};

// Elliptic curve primitives
pub mod ec;
pub use ec::{EcDomainParameters, EcPoint, EcPrivateKey, EcPublicKey};
