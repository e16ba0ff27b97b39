//! Key lifecycle layer for eidcrypt
//!
//! A uniform [`HsmService`] over a software backend and, with the `pkcs11`
//! feature, a hardware token reached through a PKCS#11 provider. Keys are
//! addressed by alias and every key carries an X.509 certificate that
//! records its generation and expiration dates.
//!
//! ```no_run
//! use eidcrypt_hsm::{create_hsm_service, HsmConfiguration, KeySpec};
//!
//! # fn main() -> eidcrypt_api::Result<()> {
//! let config = HsmConfiguration::NoHsm;
//! let hsm = create_hsm_service(&config)?;
//! hsm.init(&config)?;
//! let spec = KeySpec::standardized_curve(12)?;
//! hsm.generate_key_pair("ECDSA", &spec, "terminal", None, false, 12)?;
//! # Ok(())
//! # }
//! ```
//!
//! Several instances sharing one identity are tied together with
//! [`ClusteredHsm`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod certificate;
pub mod cluster;
pub mod config;
pub mod factory;
pub mod keys;
pub mod local;
#[cfg(feature = "pkcs11")]
pub mod pkcs11;
pub mod service;

pub use certificate::{CertificateTemplate, X509Certificate};
pub use cluster::ClusteredHsm;
pub use config::{HsmConfiguration, Pkcs11ProviderConfig, RetryPolicy};
pub use factory::create_hsm_service;
pub use keys::{KeyPackage, KeySpec, PublicKey};
pub use local::LocalHsmService;
#[cfg(feature = "pkcs11")]
pub use pkcs11::Pkcs11HsmService;
pub use service::{encode_ecdsa_signature, HsmService};
