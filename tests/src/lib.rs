//! Shared fixtures for the eidcrypt integration tests and benchmarks

use eidcrypt_algorithms::ec::parameter_spec_from_curve_id;
use eidcrypt_algorithms::{AesKdf, AesKeyMaterial, EcDomainParameters, SecretKey, SendSequenceCounter};
use eidcrypt_api::Result;
use eidcrypt_hsm::{HsmConfiguration, HsmService, LocalHsmService};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

pub mod vectors;

/// Deterministic RNG for reproducible key material
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Standardized domain parameters, panicking on an unknown ID
pub fn curve(id: i64) -> EcDomainParameters {
    parameter_spec_from_curve_id(id).expect("standardized curve ID")
}

/// A software HSM that is already initialized
pub fn software_hsm() -> LocalHsmService {
    let hsm = LocalHsmService::new();
    hsm.init(&HsmConfiguration::NoHsm)
        .expect("software backend initializes");
    hsm
}

/// Secure-messaging session keys derived from a Chip Authentication secret
///
/// The counter starts at zero, as after a successful key agreement.
pub fn session_keys(shared_secret: &[u8], key_size: usize) -> Result<AesKeyMaterial> {
    let kdf = AesKdf::new(key_size)?;
    let enc: SecretKey = kdf.derive_enc_key(shared_secret, None)?;
    let mac: SecretKey = kdf.derive_mac_key(shared_secret, None)?;
    Ok(AesKeyMaterial::new(enc, mac, SendSequenceCounter::zero())?)
}
