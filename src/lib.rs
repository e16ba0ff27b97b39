//! # eidcrypt
//!
//! Elliptic-curve and key-lifecycle core for eID Extended Access Control.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! eidcrypt = "0.4"
//! ```
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `hsm` (default): Key lifecycle layer with the software backend
//! - `pkcs11`: Hardware backend through a PKCS#11 provider library
//! - `serde`: Serialization support
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`eidcrypt-api`]: Error taxonomy and the cluster lock contract
//! - [`eidcrypt-params`]: Curve tables, OIDs and size constants
//! - [`eidcrypt-algorithms`]: EC arithmetic, domain parameters, AES and AES-CMAC
//! - [`eidcrypt-hsm`]: HSM abstraction, software and PKCS#11 backends, clustering

// Core re-exports (always available)
pub use eidcrypt_algorithms as algorithms;
pub use eidcrypt_api as api;
pub use eidcrypt_params as params;

// Feature-gated re-exports
#[cfg(feature = "hsm")]
pub use eidcrypt_hsm as hsm;

#[cfg(feature = "serde")]
pub use serde;

/// Common imports for eidcrypt users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result, ResultExt};

    // Re-export the cluster lock contract
    pub use crate::api::{KeyLockOracle, SingleInstance};

    // Re-export primitive types
    pub use crate::algorithms::{
        AesKdf, AesKeyMaterial, AlgorithmIdentifier, DigestAlgorithm, EcDomainParameters,
        EcPoint, EcPrivateKey, EcPublicKey, Oid, SecretKey, SendSequenceCounter,
        SignatureAlgorithm,
    };

    // Scalar bytes come back wrapped
    pub use zeroize::Zeroizing;

    // Re-export secure-messaging functions
    pub use crate::algorithms::{cmac, cmac_with_iv, decipher_aes, encipher_aes};

    // Re-export the key lifecycle layer
    #[cfg(feature = "hsm")]
    pub use crate::hsm::{
        create_hsm_service, ClusteredHsm, HsmConfiguration, HsmService, KeyPackage, KeySpec,
        PublicKey, RetryPolicy,
    };
}
