//! Backend selection from configuration

use eidcrypt_api::Result;
#[cfg(not(feature = "pkcs11"))]
use eidcrypt_api::Error;
use tracing::debug;

use crate::config::HsmConfiguration;
use crate::local::LocalHsmService;
use crate::service::HsmService;

/// Uninitialized service for `config`
///
/// The caller still has to call [`HsmService::init`] with the same
/// configuration. PKCS#11 configurations need the `pkcs11` feature.
pub fn create_hsm_service(config: &HsmConfiguration) -> Result<Box<dyn HsmService>> {
    debug!(backend = config.kind(), "creating HSM service");
    match config {
        HsmConfiguration::NoHsm => Ok(Box::new(LocalHsmService::new())),
        #[cfg(feature = "pkcs11")]
        HsmConfiguration::Pkcs11 { .. } => Ok(Box::new(crate::pkcs11::Pkcs11HsmService::new())),
        #[cfg(not(feature = "pkcs11"))]
        HsmConfiguration::Pkcs11 { .. } => Err(Error::invalid_argument(
            "create_hsm_service",
            "PKCS#11 support is not compiled in, enable the 'pkcs11' feature",
        )),
    }
}
