//! PKCS#11 HSM backend
//!
//! Keys are token objects labelled with their alias: a private key, a
//! public key and an X.509 certificate object per alias. The certificate
//! is the source for the public key and the validity dates. ECDSA digests
//! are computed in software and signed with `CKM_ECDSA`; RSA signatures
//! use the combined hash-and-sign mechanisms of the token.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use cryptoki::context::{CInitializeArgs, Pkcs11};
use cryptoki::mechanism::rsa::{PkcsMgfType, PkcsPssParams};
use cryptoki::mechanism::{Mechanism, MechanismType};
use cryptoki::object::{Attribute, AttributeType, CertificateType, KeyType, ObjectClass, ObjectHandle};
use cryptoki::session::{Session, UserType};
use cryptoki::slot::Slot;
use cryptoki::types::AuthPin;
use eidcrypt_algorithms::asn1::{tag, Tlv};
use eidcrypt_algorithms::ec::{point_from_bytes, EcdsaSignature};
use eidcrypt_algorithms::hash::DigestAlgorithm;
use eidcrypt_algorithms::{EcDomainParameters, EcPrivateKey, EcPublicKey, Oid, SignatureAlgorithm, SignatureKind};
use eidcrypt_api::{Error, Result, ResultExt};
use eidcrypt_params::traditional::oids;
use num_bigint::BigUint;
use parking_lot::Mutex;
use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

use crate::certificate::{certificate_algorithm, CertificateTemplate, X509Certificate};
use crate::config::{HsmConfiguration, Pkcs11ProviderConfig};
use crate::keys::{KeyPackage, KeySpec, PublicKey};
use crate::service::{check_alias, encode_ecdsa_signature, effective_issuer, ensure_ready, HsmService};

const RSA_PUBLIC_EXPONENT: [u8; 3] = [0x01, 0x00, 0x01];

struct Connection {
    session: Session,
    // keeps the library loaded for the session's lifetime
    _context: Pkcs11,
    extractable_keys: bool,
}

/// HSM reached through a PKCS#11 provider library
pub struct Pkcs11HsmService {
    connection: Mutex<Option<Connection>>,
}

impl Pkcs11HsmService {
    /// Service without a token connection
    pub fn new() -> Self {
        Self {
            connection: Mutex::new(None),
        }
    }

    fn connect(provider: &Pkcs11ProviderConfig, password: &str) -> Result<Connection> {
        let context = Pkcs11::new(&provider.library).or_hsm_error("init")?;
        context
            .initialize(CInitializeArgs::OsThreads)
            .or_hsm_error("init")?;
        let slot = match provider.slot {
            Some(id) => Slot::try_from(id).or_hsm_error("init")?,
            None => {
                let index = provider.slot_list_index.unwrap_or(0);
                context
                    .get_slots_with_token()
                    .or_hsm_error("init")?
                    .get(index)
                    .copied()
                    .ok_or_else(|| {
                        Error::hsm("init", format!("no token in slot list index {}", index))
                    })?
            }
        };
        let session = context.open_rw_session(slot).or_hsm_error("init")?;
        session
            .login(UserType::User, Some(&AuthPin::new(password.to_string())))
            .or_hsm_error("init")?;
        debug!(slot = slot.id(), "logged in to token");
        Ok(Connection {
            session,
            _context: context,
            extractable_keys: provider.extractable_keys,
        })
    }

    fn with_session<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Connection) -> Result<T>,
    ) -> Result<T> {
        let guard = self.connection.lock();
        match guard.as_ref() {
            Some(connection) => f(connection),
            None => Err(Error::illegal_state(operation, "HSM service is not initialized")),
        }
    }
}

impl Default for Pkcs11HsmService {
    fn default() -> Self {
        Self::new()
    }
}

fn find(session: &Session, class: ObjectClass, alias: &str) -> Result<Vec<ObjectHandle>> {
    session
        .find_objects(&[
            Attribute::Class(class),
            Attribute::Label(alias.as_bytes().to_vec()),
        ])
        .or_hsm_error("find objects")
}

fn find_one(session: &Session, class: ObjectClass, alias: &str) -> Result<ObjectHandle> {
    find(session, class, alias)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::KeyNotFound {
            alias: alias.to_string(),
        })
}

fn read_certificate(session: &Session, alias: &str) -> Result<X509Certificate> {
    let handle = find_one(session, ObjectClass::CERTIFICATE, alias)?;
    let attributes = session
        .get_attributes(handle, &[AttributeType::Value])
        .or_hsm_error("read certificate")?;
    match attributes.into_iter().next() {
        Some(Attribute::Value(der)) => X509Certificate::from_der(&der),
        _ => Err(Error::hsm("read certificate", "certificate object has no value")),
    }
}

fn store_certificate(session: &Session, alias: &str, certificate: &X509Certificate) -> Result<()> {
    session
        .create_object(&[
            Attribute::Class(ObjectClass::CERTIFICATE),
            Attribute::CertificateType(CertificateType::X_509),
            Attribute::Token(true),
            Attribute::Label(alias.as_bytes().to_vec()),
            Attribute::Value(certificate.to_der().to_vec()),
        ])
        .or_hsm_error("store certificate")?;
    Ok(())
}

/// Remove every object labelled `alias`; true when a private key was among them
fn destroy_alias(session: &Session, alias: &str) -> Result<bool> {
    let private = find(session, ObjectClass::PRIVATE_KEY, alias)?;
    let found = !private.is_empty();
    let others = [ObjectClass::PUBLIC_KEY, ObjectClass::CERTIFICATE]
        .into_iter()
        .map(|class| find(session, class, alias))
        .collect::<Result<Vec<_>>>()?;
    for handle in private.into_iter().chain(others.into_iter().flatten()) {
        session.destroy_object(handle).or_hsm_error("delete key")?;
    }
    Ok(found)
}

/// `CKA_EC_POINT` holds the point either bare or wrapped in an OCTET STRING
fn unwrap_ec_point(value: &[u8], params: &EcDomainParameters) -> Result<Vec<u8>> {
    if value.len() == 2 * params.field_size_bytes() + 1 && value.first() == Some(&0x04) {
        return Ok(value.to_vec());
    }
    let wrapped = Tlv::from_der(value)?;
    wrapped.expect_tag(tag::OCTET_STRING, "CKA_EC_POINT")?;
    Ok(wrapped.into_value())
}

fn ec_point_attribute(public: &EcPublicKey) -> Result<Vec<u8>> {
    Ok(Tlv::octet_string(&public.to_uncompressed()?).to_der())
}

fn signing_mechanism(algorithm: &SignatureAlgorithm) -> Result<Mechanism<'static>> {
    use DigestAlgorithm::*;
    let pss = |hash_alg, mgf, s_len: u64| PkcsPssParams {
        hash_alg,
        mgf,
        s_len: s_len.into(),
    };
    let mechanism = match (algorithm.kind, algorithm.digest) {
        (SignatureKind::Ecdsa, _) => Mechanism::Ecdsa,
        (SignatureKind::RsaPkcs1, Sha1) => Mechanism::Sha1RsaPkcs,
        (SignatureKind::RsaPkcs1, Sha224) => Mechanism::Sha224RsaPkcs,
        (SignatureKind::RsaPkcs1, Sha256) => Mechanism::Sha256RsaPkcs,
        (SignatureKind::RsaPkcs1, Sha384) => Mechanism::Sha384RsaPkcs,
        (SignatureKind::RsaPkcs1, Sha512) => Mechanism::Sha512RsaPkcs,
        (SignatureKind::RsaPss, Sha1) => {
            Mechanism::Sha1RsaPkcsPss(pss(MechanismType::SHA1, PkcsMgfType::MGF1_SHA1, 20))
        }
        (SignatureKind::RsaPss, Sha256) => Mechanism::Sha256RsaPkcsPss(pss(
            MechanismType::SHA256,
            PkcsMgfType::MGF1_SHA256,
            32,
        )),
        (SignatureKind::RsaPss, Sha512) => Mechanism::Sha512RsaPkcsPss(pss(
            MechanismType::SHA512,
            PkcsMgfType::MGF1_SHA512,
            64,
        )),
        (SignatureKind::RsaPss, other) => {
            return Err(Error::invalid_argument(
                "sign",
                format!("RSA-PSS with {} is not supported", other),
            ))
        }
    };
    Ok(mechanism)
}

/// Sign on the token; ECDSA results come back as [`EcdsaSignature`] components
fn token_sign(
    session: &Session,
    handle: ObjectHandle,
    algorithm: &SignatureAlgorithm,
    data: &[u8],
) -> Result<TokenSignature> {
    let mechanism = signing_mechanism(algorithm)?;
    if algorithm.kind.is_ec() {
        let digest = algorithm.digest.digest(data);
        let raw = session
            .sign(&mechanism, handle, &digest)
            .or_hsm_error("sign")?;
        Ok(TokenSignature::Ecdsa(EcdsaSignature::from_raw(&raw)?))
    } else {
        Ok(TokenSignature::Rsa(
            session.sign(&mechanism, handle, data).or_hsm_error("sign")?,
        ))
    }
}

enum TokenSignature {
    Ecdsa(EcdsaSignature),
    Rsa(Vec<u8>),
}

/// Certificate signature algorithm for an issuer key
fn issuer_algorithm(issuer: &PublicKey) -> Result<&'static SignatureAlgorithm> {
    match issuer {
        PublicKey::Ec(key) => Ok(certificate_algorithm(key.params())),
        PublicKey::Rsa { .. } => Ok(SignatureAlgorithm::from_oid(&Oid::from_arcs(
            oids::SHA256_WITH_RSA_ENCRYPTION,
        )?)?),
    }
}

fn issue_certificate(
    session: &Session,
    template: CertificateTemplate,
    subject_key: &PublicKey,
    issuer_handle: ObjectHandle,
    issuer_key: &PublicKey,
) -> Result<X509Certificate> {
    let algorithm = issuer_algorithm(issuer_key)?;
    let tbs = template.to_be_signed(subject_key, algorithm)?;
    let signature = match token_sign(session, issuer_handle, algorithm, &tbs)? {
        TokenSignature::Ecdsa(sig) => sig.to_der(),
        TokenSignature::Rsa(sig) => sig,
    };
    X509Certificate::assemble(&tbs, algorithm, &signature)
}

/// Run `cleanup` before passing an error on
fn cleanup_on_error<T>(result: Result<T>, cleanup: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        cleanup();
    }
    result
}

/// Issue the certificate for a freshly generated pair and store it next to the keys
fn certify_on_token(
    session: &Session,
    alias: &str,
    issuer_alias: Option<&str>,
    lifespan_months: u32,
    handle: ObjectHandle,
    public: &PublicKey,
) -> Result<()> {
    let template = CertificateTemplate::new(alias, lifespan_months)?;
    let issuer = effective_issuer(alias, issuer_alias).and_then(|name| {
        let handle = find_one(session, ObjectClass::PRIVATE_KEY, name).ok()?;
        let key = read_certificate(session, name)
            .and_then(|cert| cert.public_key())
            .ok()?;
        Some((name, handle, key))
    });
    let certificate = match issuer {
        Some((name, issuer_handle, issuer_key)) => issue_certificate(
            session,
            template.issued_by(name),
            public,
            issuer_handle,
            &issuer_key,
        )?,
        None => {
            if let Some(name) = effective_issuer(alias, issuer_alias) {
                warn!(alias, issuer = name, "issuer key not found, certificate will be self-signed");
            }
            issue_certificate(session, template, public, handle, public)?
        }
    };
    store_certificate(session, alias, &certificate)
}

fn generate_on_token(
    session: &Session,
    spec: &KeySpec,
    alias: &str,
    extractable: bool,
) -> Result<(ObjectHandle, PublicKey)> {
    let label = Attribute::Label(alias.as_bytes().to_vec());
    let private_template = vec![
        Attribute::Class(ObjectClass::PRIVATE_KEY),
        Attribute::Token(true),
        Attribute::Private(true),
        Attribute::Sensitive(!extractable),
        Attribute::Extractable(extractable),
        Attribute::Sign(true),
        label.clone(),
    ];
    match spec {
        KeySpec::Ec(params) => {
            let ec_params = params.to_explicit_asn1()?.to_der();
            let public_template = [
                Attribute::Class(ObjectClass::PUBLIC_KEY),
                Attribute::KeyType(KeyType::EC),
                Attribute::Token(true),
                Attribute::Verify(true),
                label,
                Attribute::EcParams(ec_params),
            ];
            let mut private_template = private_template;
            private_template.push(Attribute::KeyType(KeyType::EC));
            let (public, private) = session
                .generate_key_pair(&Mechanism::EccKeyPairGen, &public_template, &private_template)
                .or_hsm_error("generate_key_pair")?;
            let attributes = session
                .get_attributes(public, &[AttributeType::EcPoint])
                .or_hsm_error("generate_key_pair")?;
            let point = match attributes.into_iter().next() {
                Some(Attribute::EcPoint(value)) => unwrap_ec_point(&value, params)?,
                _ => return Err(Error::hsm("generate_key_pair", "public key has no EC point")),
            };
            let point = point_from_bytes(&point, params.field_size_bytes())?;
            Ok((private, PublicKey::Ec(EcPublicKey::new(point, params.clone())?)))
        }
        KeySpec::Rsa { modulus_bits } => {
            let public_template = [
                Attribute::Class(ObjectClass::PUBLIC_KEY),
                Attribute::KeyType(KeyType::RSA),
                Attribute::Token(true),
                Attribute::Verify(true),
                label,
                Attribute::ModulusBits(u64::from(*modulus_bits).into()),
                Attribute::PublicExponent(RSA_PUBLIC_EXPONENT.to_vec()),
            ];
            let mut private_template = private_template;
            private_template.push(Attribute::KeyType(KeyType::RSA));
            let (public, private) = session
                .generate_key_pair(
                    &Mechanism::RsaPkcsKeyPairGen,
                    &public_template,
                    &private_template,
                )
                .or_hsm_error("generate_key_pair")?;
            let attributes = session
                .get_attributes(public, &[AttributeType::Modulus, AttributeType::PublicExponent])
                .or_hsm_error("generate_key_pair")?;
            let mut modulus = None;
            let mut public_exponent = None;
            for attribute in attributes {
                match attribute {
                    Attribute::Modulus(n) => modulus = Some(BigUint::from_bytes_be(&n)),
                    Attribute::PublicExponent(e) => public_exponent = Some(BigUint::from_bytes_be(&e)),
                    _ => {}
                }
            }
            match (modulus, public_exponent) {
                (Some(modulus), Some(public_exponent)) => Ok((
                    private,
                    PublicKey::Rsa {
                        modulus,
                        public_exponent,
                    },
                )),
                _ => Err(Error::hsm("generate_key_pair", "RSA public key incomplete")),
            }
        }
    }
}

impl HsmService for Pkcs11HsmService {
    fn init(&self, config: &HsmConfiguration) -> Result<()> {
        let (config_file_path, password) = match config {
            HsmConfiguration::Pkcs11 {
                config_file_path,
                password,
            } => (config_file_path, password),
            other => {
                return Err(Error::invalid_argument(
                    "init",
                    format!("PKCS#11 HSM cannot use a {} configuration", other.kind()),
                ))
            }
        };
        let mut guard = self.connection.lock();
        if guard.is_some() {
            return Err(Error::illegal_state("init", "HSM service is already initialized"));
        }
        let connected = Pkcs11ProviderConfig::load(config_file_path)
            .or_hsm_error("init")
            .and_then(|provider| {
                let connection = Self::connect(&provider, password)?;
                Ok((provider, connection))
            });
        match connected {
            Ok((provider, connection)) => {
                *guard = Some(connection);
                info!(
                    backend = "pkcs11",
                    provider = provider.name.as_deref().unwrap_or("unnamed"),
                    "HSM service initialized"
                );
                Ok(())
            }
            Err(err) => {
                *guard = None;
                warn!(backend = "pkcs11", error = %err, "HSM initialization failed");
                Err(err)
            }
        }
    }

    fn logout(&self) -> Result<()> {
        let mut guard = self.connection.lock();
        let connection = guard.take();
        ensure_ready(connection.is_some(), "logout")?;
        if let Some(connection) = connection {
            if let Err(err) = connection.session.logout() {
                warn!(error = %err, "token logout failed, dropping session");
            }
        }
        info!(backend = "pkcs11", "HSM service logged out");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.connection.lock().is_some()
    }

    fn is_alive(&self, _all: bool) -> Result<bool> {
        self.with_session("is_alive", |c| {
            Ok(c.session
                .find_objects(&[Attribute::Class(ObjectClass::PRIVATE_KEY)])
                .is_ok())
        })
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
        self.with_session("generate_key_pair", |c| {
            check_alias(alias, "generate_key_pair")?;
            spec.check_algorithm(algorithm)?;
            let session = &c.session;
            if !find(session, ObjectClass::PRIVATE_KEY, alias)?.is_empty() {
                if !replace {
                    return Err(Error::AliasExists {
                        alias: alias.to_string(),
                    });
                }
                destroy_alias(session, alias)?;
                info!(alias, "deleted key before replacement");
            }

            let (handle, public) = generate_on_token(session, spec, alias, c.extractable_keys)?;
            let certified =
                certify_on_token(session, alias, issuer_alias, lifespan_months, handle, &public);
            cleanup_on_error(certified, || match destroy_alias(session, alias) {
                Ok(_) => warn!(alias, "removed key pair that could not be certified"),
                Err(err) => {
                    error!(alias, error = %err, "could not remove uncertified key pair")
                }
            })?;
            info!(alias, key = public.algorithm(), lifespan_months, "generated key pair on token");
            Ok(public)
        })
    }

    fn sign(&self, alias: &str, algorithm: &Oid, data: &[u8]) -> Result<Vec<u8>> {
        self.with_session("sign", |c| {
            let signature_algorithm = SignatureAlgorithm::from_oid(algorithm)
                .map_err(|e| Error::from(e).with_context("sign"))?;
            let handle = find_one(&c.session, ObjectClass::PRIVATE_KEY, alias)?;
            let public = read_certificate(&c.session, alias)?.public_key()?;
            if signature_algorithm.kind.is_ec() != public.as_ec().is_some() {
                return Err(Error::invalid_argument(
                    "sign",
                    format!(
                        "{} does not fit the {} key under {}",
                        signature_algorithm.jca_name,
                        public.algorithm(),
                        alias
                    ),
                ));
            }
            debug!(alias, algorithm = signature_algorithm.jca_name, "signing on token");
            match (token_sign(&c.session, handle, signature_algorithm, data)?, &public) {
                (TokenSignature::Ecdsa(sig), PublicKey::Ec(key)) => {
                    encode_ecdsa_signature(signature_algorithm, &sig, key.params())
                }
                (TokenSignature::Rsa(sig), _) => Ok(sig),
                (TokenSignature::Ecdsa(_), PublicKey::Rsa { .. }) => {
                    Err(Error::hsm("sign", "ECDSA signature from an RSA key"))
                }
            }
        })
    }

    fn get_aliases(&self) -> Result<Vec<String>> {
        self.with_session("get_aliases", |c| {
            let handles = c
                .session
                .find_objects(&[Attribute::Class(ObjectClass::PRIVATE_KEY)])
                .or_hsm_error("get_aliases")?;
            let mut aliases = Vec::with_capacity(handles.len());
            for handle in handles {
                let attributes = c
                    .session
                    .get_attributes(handle, &[AttributeType::Label])
                    .or_hsm_error("get_aliases")?;
                if let Some(Attribute::Label(label)) = attributes.into_iter().next() {
                    aliases.push(String::from_utf8_lossy(&label).into_owned());
                }
            }
            aliases.sort();
            aliases.dedup();
            Ok(aliases)
        })
    }

    fn contains_key(&self, alias: &str) -> Result<bool> {
        self.with_session("contains_key", |c| {
            Ok(!find(&c.session, ObjectClass::PRIVATE_KEY, alias)?.is_empty())
        })
    }

    fn delete_key(&self, alias: &str) -> Result<()> {
        self.with_session("delete_key", |c| {
            if !destroy_alias(&c.session, alias)? {
                return Err(Error::KeyNotFound {
                    alias: alias.to_string(),
                });
            }
            info!(alias, "deleted key from token");
            Ok(())
        })
    }

    fn get_public_key(&self, alias: &str) -> Result<PublicKey> {
        self.with_session("get_public_key", |c| {
            debug!(alias, "public key lookup");
            read_certificate(&c.session, alias)?.public_key()
        })
    }

    fn get_certificate_chain(&self, alias: &str) -> Result<Vec<Vec<u8>>> {
        self.with_session("get_certificate_chain", |c| {
            let mut current = read_certificate(&c.session, alias)?;
            let mut visited = HashSet::from([alias.to_string()]);
            let mut chain = vec![current.to_der().to_vec()];
            while !current.is_self_issued() && visited.insert(current.issuer().to_string()) {
                match read_certificate(&c.session, current.issuer()) {
                    Ok(issuer) => {
                        chain.push(issuer.to_der().to_vec());
                        current = issuer;
                    }
                    Err(err) if err.is_key_not_found() => break,
                    Err(err) => return Err(err),
                }
            }
            Ok(chain)
        })
    }

    fn get_generation_date(&self, alias: &str) -> Result<DateTime<Utc>> {
        self.with_session("get_generation_date", |c| {
            Ok(read_certificate(&c.session, alias)?.not_before())
        })
    }

    fn get_expiration_date(&self, alias: &str) -> Result<DateTime<Utc>> {
        self.with_session("get_expiration_date", |c| {
            Ok(read_certificate(&c.session, alias)?.not_after())
        })
    }

    fn export_key(&self, alias: &str) -> Result<KeyPackage> {
        self.with_session("export_key", |c| {
            let handle = find_one(&c.session, ObjectClass::PRIVATE_KEY, alias)?;
            let certificate = read_certificate(&c.session, alias)?;
            let params = match certificate.public_key()? {
                PublicKey::Ec(key) => key.params().clone(),
                PublicKey::Rsa { .. } => {
                    return Err(Error::invalid_argument("export_key", "RSA keys cannot be exported"))
                }
            };
            let attributes = c
                .session
                .get_attributes(handle, &[AttributeType::Value])
                .or_hsm_error("export_key")?;
            let scalar = match attributes.into_iter().next() {
                Some(Attribute::Value(bytes)) => Zeroizing::new(bytes),
                _ => return Err(Error::hsm("export_key", "private key is not extractable")),
            };
            let issuer_alias = (!certificate.is_self_issued()).then(|| certificate.issuer().to_string());
            KeyPackage::new(EcPrivateKey::from_bytes(&scalar, params)?, certificate, issuer_alias)
        })
    }

    fn import_key(&self, alias: &str, package: &KeyPackage) -> Result<()> {
        self.with_session("import_key", |c| {
            check_alias(alias, "import_key")?;
            let session = &c.session;
            let replaced = destroy_alias(session, alias)?;
            let private_key = package.private_key();
            let ec_params = private_key.params().to_explicit_asn1()?.to_der();
            let public = match package.certificate().public_key()? {
                PublicKey::Ec(key) => key,
                PublicKey::Rsa { .. } => {
                    return Err(Error::invalid_argument("import_key", "package holds no EC key"))
                }
            };
            let label = Attribute::Label(alias.as_bytes().to_vec());
            session
                .create_object(&[
                    Attribute::Class(ObjectClass::PRIVATE_KEY),
                    Attribute::KeyType(KeyType::EC),
                    Attribute::Token(true),
                    Attribute::Private(true),
                    Attribute::Sensitive(!c.extractable_keys),
                    Attribute::Extractable(c.extractable_keys),
                    Attribute::Sign(true),
                    label.clone(),
                    Attribute::EcParams(ec_params.clone()),
                    Attribute::Value(private_key.to_scalar_bytes().to_vec()),
                ])
                .or_hsm_error("import_key")?;
            session
                .create_object(&[
                    Attribute::Class(ObjectClass::PUBLIC_KEY),
                    Attribute::KeyType(KeyType::EC),
                    Attribute::Token(true),
                    Attribute::Verify(true),
                    label,
                    Attribute::EcParams(ec_params),
                    Attribute::EcPoint(ec_point_attribute(&public)?),
                ])
                .or_hsm_error("import_key")?;
            store_certificate(session, alias, package.certificate())?;
            info!(alias, replaced, "imported key into token");
            Ok(())
        })
    }

    fn is_key_being_modified(&self, _alias: &str) -> Result<bool> {
        self.with_session("is_key_being_modified", |_| Ok(false))
    }

    fn distribute_key(&self, alias: &str) -> Result<()> {
        self.with_session("distribute_key", |_| {
            debug!(alias, "single instance, nothing to distribute");
            Ok(())
        })
    }
}
