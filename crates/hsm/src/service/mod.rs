//! The uniform HSM interface
//!
//! [`HsmService`] is implemented by the software backend, the PKCS#11
//! backend and the cluster wrapper. Callers see the same semantics from
//! each of them:
//!
//! - `init` moves the service from uninitialized to ready, `logout` back
//! - every other operation except [`HsmService::is_initialized`] fails with
//!   `IllegalState` while the service is not ready
//! - lookups of an absent alias fail with `KeyNotFound`; `contains_key`
//!   answers `false` instead

use chrono::{DateTime, Utc};
use eidcrypt_algorithms::ec::EcdsaSignature;
use eidcrypt_algorithms::{EcDomainParameters, Oid, SignatureAlgorithm};
use eidcrypt_api::{Error, Result};

use crate::config::HsmConfiguration;
use crate::keys::{KeyPackage, KeySpec, PublicKey};

/// Key storage and signing service
pub trait HsmService: Send + Sync {
    /// Connect the service to its key store
    fn init(&self, config: &HsmConfiguration) -> Result<()>;

    /// Disconnect and return to the uninitialized state
    fn logout(&self) -> Result<()>;

    /// Whether `init` succeeded and no `logout` followed
    fn is_initialized(&self) -> bool;

    /// Whether the key store answers; with `all`, every cluster member must
    fn is_alive(&self, all: bool) -> Result<bool>;

    /// Generate a key pair under `alias` and certify it
    ///
    /// The certificate is signed by the key under `issuer_alias`, or is
    /// self-signed when no issuer is named. It is valid from now for
    /// `lifespan_months`.
    fn generate_key_pair(
        &self,
        algorithm: &str,
        spec: &KeySpec,
        alias: &str,
        issuer_alias: Option<&str>,
        replace: bool,
        lifespan_months: u32,
    ) -> Result<PublicKey>;

    /// Sign `data` with the key under `alias` using the algorithm `algorithm`
    fn sign(&self, alias: &str, algorithm: &Oid, data: &[u8]) -> Result<Vec<u8>>;

    /// All stored aliases
    fn get_aliases(&self) -> Result<Vec<String>>;

    /// Whether a key is stored under `alias`
    fn contains_key(&self, alias: &str) -> Result<bool>;

    /// Remove the key and its certificate
    fn delete_key(&self, alias: &str) -> Result<()>;

    /// Public key under `alias`
    fn get_public_key(&self, alias: &str) -> Result<PublicKey>;

    /// DER certificates from the key's own certificate up to the root
    fn get_certificate_chain(&self, alias: &str) -> Result<Vec<Vec<u8>>>;

    /// Start of the key's validity
    fn get_generation_date(&self, alias: &str) -> Result<DateTime<Utc>>;

    /// End of the key's validity
    fn get_expiration_date(&self, alias: &str) -> Result<DateTime<Utc>>;

    /// Extract the key for transfer to another instance
    fn export_key(&self, alias: &str) -> Result<KeyPackage>;

    /// Store an exported key, replacing any key under `alias`
    fn import_key(&self, alias: &str, package: &KeyPackage) -> Result<()>;

    /// Whether another instance is currently changing the key
    fn is_key_being_modified(&self, alias: &str) -> Result<bool>;

    /// Propagate the key to every other instance
    fn distribute_key(&self, alias: &str) -> Result<()>;
}

/// `IllegalState` unless `initialized`
pub(crate) fn ensure_ready(initialized: bool, operation: &'static str) -> Result<()> {
    if initialized {
        Ok(())
    } else {
        Err(Error::illegal_state(operation, "HSM service is not initialized"))
    }
}

/// Reject empty aliases
pub(crate) fn check_alias(alias: &str, operation: &'static str) -> Result<()> {
    if alias.is_empty() {
        return Err(Error::invalid_argument(operation, "alias must not be empty"));
    }
    Ok(())
}

/// An issuer alias that names a key other than the one being generated
pub(crate) fn effective_issuer<'a>(alias: &str, issuer_alias: Option<&'a str>) -> Option<&'a str> {
    issuer_alias.filter(|issuer| !issuer.is_empty() && *issuer != alias)
}

/// Final output format of an ECDSA signature
///
/// Terminal Authentication OIDs get `r || s` with each half at the field
/// size in bytes; X.509 OIDs get DER.
pub fn encode_ecdsa_signature(
    algorithm: &SignatureAlgorithm,
    signature: &EcdsaSignature,
    params: &EcDomainParameters,
) -> Result<Vec<u8>> {
    if algorithm.needs_raw_conversion {
        Ok(signature.to_raw(params.field_size_bytes())?)
    } else {
        Ok(signature.to_der())
    }
}
