//! Software HSM backend
//!
//! Keys live in an instance-owned map in process memory and vanish with the
//! service. Only EC keys can be generated here; RSA signing is a pass-through
//! feature of hardware tokens.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use eidcrypt_algorithms::ec::{generate_key_pair, sign_raw, EcdsaSignature};
use eidcrypt_algorithms::{EcPrivateKey, Oid, SignatureAlgorithm};
use eidcrypt_api::{Error, Result};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::certificate::{CertificateTemplate, X509Certificate};
use crate::config::HsmConfiguration;
use crate::keys::{KeyPackage, KeySpec, PublicKey};
use crate::service::{check_alias, encode_ecdsa_signature, effective_issuer, ensure_ready, HsmService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServiceState {
    Uninitialized,
    Ready,
}

#[derive(Clone)]
struct KeyEntry {
    private_key: EcPrivateKey,
    certificate: X509Certificate,
    issuer_alias: Option<String>,
}

/// In-memory HSM
pub struct LocalHsmService {
    state: RwLock<ServiceState>,
    keys: RwLock<HashMap<String, KeyEntry>>,
}

impl LocalHsmService {
    /// Empty, uninitialized service
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ServiceState::Uninitialized),
            keys: RwLock::new(HashMap::new()),
        }
    }

    fn ready(&self, operation: &'static str) -> Result<()> {
        ensure_ready(*self.state.read() == ServiceState::Ready, operation)
    }

    fn with_entry<T>(&self, alias: &str, f: impl FnOnce(&KeyEntry) -> Result<T>) -> Result<T> {
        let keys = self.keys.read();
        let entry = keys.get(alias).ok_or_else(|| Error::KeyNotFound {
            alias: alias.to_string(),
        })?;
        f(entry)
    }
}

impl Default for LocalHsmService {
    fn default() -> Self {
        Self::new()
    }
}

impl HsmService for LocalHsmService {
    fn init(&self, config: &HsmConfiguration) -> Result<()> {
        if !matches!(config, HsmConfiguration::NoHsm) {
            return Err(Error::invalid_argument(
                "init",
                format!("software HSM cannot use a {} configuration", config.kind()),
            ));
        }
        let mut state = self.state.write();
        if *state == ServiceState::Ready {
            return Err(Error::illegal_state("init", "HSM service is already initialized"));
        }
        *state = ServiceState::Ready;
        info!(backend = "software", "HSM service initialized");
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        let mut state = self.state.write();
        ensure_ready(*state == ServiceState::Ready, "logout")?;
        *state = ServiceState::Uninitialized;
        info!(backend = "software", "HSM service logged out");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        *self.state.read() == ServiceState::Ready
    }

    fn is_alive(&self, _all: bool) -> Result<bool> {
        self.ready("is_alive")?;
        Ok(true)
    }

    fn generate_key_pair(
        &self,
        algorithm: &str,
        spec: &KeySpec,
        alias: &str,
        issuer_alias: Option<&str>,
        replace: bool,
        lifespan_months: u32,
    ) -> Result<PublicKey> {
        self.ready("generate_key_pair")?;
        check_alias(alias, "generate_key_pair")?;
        spec.check_algorithm(algorithm)?;
        let params = match spec {
            KeySpec::Ec(params) => params,
            KeySpec::Rsa { .. } => {
                return Err(Error::invalid_argument(
                    "generate_key_pair",
                    "RSA keys can only be generated on a PKCS#11 token",
                ))
            }
        };

        let mut keys = self.keys.write();
        if keys.contains_key(alias) && !replace {
            return Err(Error::AliasExists {
                alias: alias.to_string(),
            });
        }

        let mut rng = rand::thread_rng();
        let (public, private) = generate_key_pair(params, &mut rng)?;
        let public = PublicKey::Ec(public);
        let template = CertificateTemplate::new(alias, lifespan_months)?;

        let issuer = effective_issuer(alias, issuer_alias);
        let (certificate, issuer_alias) = match issuer.and_then(|name| keys.get(name).map(|e| (name, e))) {
            Some((name, entry)) => (
                template
                    .issued_by(name)
                    .sign(&public, &entry.private_key, &mut rng)?,
                Some(name.to_string()),
            ),
            None => {
                if let Some(name) = issuer {
                    warn!(alias, issuer = name, "issuer key not found, certificate will be self-signed");
                }
                (template.sign(&public, &private, &mut rng)?, None)
            }
        };

        let replaced = keys
            .insert(
                alias.to_string(),
                KeyEntry {
                    private_key: private,
                    certificate,
                    issuer_alias,
                },
            )
            .is_some();
        info!(
            alias,
            field_size = params.field_size_bits(),
            lifespan_months,
            replaced,
            "generated key pair"
        );
        Ok(public)
    }

    fn sign(&self, alias: &str, algorithm: &Oid, data: &[u8]) -> Result<Vec<u8>> {
        self.ready("sign")?;
        let signature_algorithm =
            SignatureAlgorithm::from_oid(algorithm).map_err(|e| Error::from(e).with_context("sign"))?;
        if !signature_algorithm.kind.is_ec() {
            return Err(Error::invalid_argument(
                "sign",
                format!("{} needs an RSA key", signature_algorithm.jca_name),
            ));
        }
        self.with_entry(alias, |entry| {
            let params = entry.private_key.params();
            let raw = sign_raw(
                &entry.private_key,
                data,
                signature_algorithm.digest,
                &mut rand::thread_rng(),
            )?;
            let signature = EcdsaSignature::from_raw(&raw)?;
            debug!(alias, algorithm = signature_algorithm.jca_name, "signed data");
            encode_ecdsa_signature(signature_algorithm, &signature, params)
        })
    }

    fn get_aliases(&self) -> Result<Vec<String>> {
        self.ready("get_aliases")?;
        let mut aliases: Vec<String> = self.keys.read().keys().cloned().collect();
        aliases.sort();
        Ok(aliases)
    }

    fn contains_key(&self, alias: &str) -> Result<bool> {
        self.ready("contains_key")?;
        Ok(self.keys.read().contains_key(alias))
    }

    fn delete_key(&self, alias: &str) -> Result<()> {
        self.ready("delete_key")?;
        match self.keys.write().remove(alias) {
            Some(_) => {
                info!(alias, "deleted key");
                Ok(())
            }
            None => Err(Error::KeyNotFound {
                alias: alias.to_string(),
            }),
        }
    }

    fn get_public_key(&self, alias: &str) -> Result<PublicKey> {
        self.ready("get_public_key")?;
        debug!(alias, "public key lookup");
        self.with_entry(alias, |entry| entry.certificate.public_key())
    }

    fn get_certificate_chain(&self, alias: &str) -> Result<Vec<Vec<u8>>> {
        self.ready("get_certificate_chain")?;
        let keys = self.keys.read();
        let mut current = keys.get(alias).ok_or_else(|| Error::KeyNotFound {
            alias: alias.to_string(),
        })?;
        let mut visited = HashSet::from([alias]);
        let mut chain = vec![current.certificate.to_der().to_vec()];
        while let Some(issuer) = current.issuer_alias.as_deref() {
            if !visited.insert(issuer) {
                break;
            }
            match keys.get(issuer) {
                Some(entry) => {
                    chain.push(entry.certificate.to_der().to_vec());
                    current = entry;
                }
                None => break,
            }
        }
        Ok(chain)
    }

    fn get_generation_date(&self, alias: &str) -> Result<DateTime<Utc>> {
        self.ready("get_generation_date")?;
        self.with_entry(alias, |entry| Ok(entry.certificate.not_before()))
    }

    fn get_expiration_date(&self, alias: &str) -> Result<DateTime<Utc>> {
        self.ready("get_expiration_date")?;
        self.with_entry(alias, |entry| Ok(entry.certificate.not_after()))
    }

    fn export_key(&self, alias: &str) -> Result<KeyPackage> {
        self.ready("export_key")?;
        self.with_entry(alias, |entry| {
            KeyPackage::new(
                entry.private_key.clone(),
                entry.certificate.clone(),
                entry.issuer_alias.clone(),
            )
        })
    }

    fn import_key(&self, alias: &str, package: &KeyPackage) -> Result<()> {
        self.ready("import_key")?;
        check_alias(alias, "import_key")?;
        let entry = KeyEntry {
            private_key: package.private_key().clone(),
            certificate: package.certificate().clone(),
            issuer_alias: package.issuer_alias().map(str::to_string),
        };
        let replaced = self.keys.write().insert(alias.to_string(), entry).is_some();
        info!(alias, replaced, "imported key");
        Ok(())
    }

    fn is_key_being_modified(&self, _alias: &str) -> Result<bool> {
        self.ready("is_key_being_modified")?;
        Ok(false)
    }

    fn distribute_key(&self, alias: &str) -> Result<()> {
        self.ready("distribute_key")?;
        debug!(alias, "single instance, nothing to distribute");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
