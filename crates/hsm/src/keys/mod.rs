//! Key values handed across the HSM boundary

use core::fmt;

use eidcrypt_algorithms::asn1::{tag, AlgorithmIdentifier, Oid, Tlv};
use eidcrypt_algorithms::ec::parameter_spec_from_curve_id;
use eidcrypt_algorithms::{EcDomainParameters, EcPrivateKey, EcPublicKey};
use eidcrypt_api::{Error, Result};
use eidcrypt_params::traditional::oids;
use num_bigint::BigUint;

use crate::certificate::X509Certificate;

/// Parameters for key generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySpec {
    /// EC key on the given domain parameters
    Ec(EcDomainParameters),
    /// RSA key with the given modulus size
    Rsa {
        /// Modulus length in bits
        modulus_bits: u32,
    },
}

impl KeySpec {
    /// EC key spec for a standardized curve ID
    pub fn standardized_curve(id: i64) -> Result<Self> {
        Ok(Self::Ec(parameter_spec_from_curve_id(id)?))
    }

    /// Key family name of this spec
    pub fn family(&self) -> &'static str {
        match self {
            Self::Ec(_) => "EC",
            Self::Rsa { .. } => "RSA",
        }
    }

    /// Check a caller-supplied algorithm name against this spec
    ///
    /// `EC` and `ECDSA` select EC keys, `RSA` selects RSA keys.
    pub fn check_algorithm(&self, algorithm: &str) -> Result<()> {
        let family = match algorithm.to_ascii_uppercase().as_str() {
            "EC" | "ECDSA" => "EC",
            "RSA" => "RSA",
            other => {
                return Err(Error::invalid_argument(
                    "key generation",
                    format!("unsupported key algorithm {}", other),
                ))
            }
        };
        if family != self.family() {
            return Err(Error::invalid_argument(
                "key generation",
                format!(
                    "algorithm {} does not match a {} key spec",
                    algorithm,
                    self.family()
                ),
            ));
        }
        Ok(())
    }
}

/// Public half of a stored key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    /// EC public key with its domain parameters
    Ec(EcPublicKey),
    /// RSA public key
    Rsa {
        /// Modulus n
        modulus: BigUint,
        /// Public exponent e
        public_exponent: BigUint,
    },
}

impl PublicKey {
    /// Key algorithm name
    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::Ec(_) => "EC",
            Self::Rsa { .. } => "RSA",
        }
    }

    /// The EC key, if this is one
    pub fn as_ec(&self) -> Option<&EcPublicKey> {
        match self {
            Self::Ec(key) => Some(key),
            Self::Rsa { .. } => None,
        }
    }

    /// DER SubjectPublicKeyInfo
    pub fn encoded(&self) -> Result<Vec<u8>> {
        match self {
            Self::Ec(key) => Ok(key.encoded()?),
            Self::Rsa {
                modulus,
                public_exponent,
            } => {
                let algorithm = AlgorithmIdentifier::new(
                    Oid::from_arcs(oids::RSA_ENCRYPTION)?,
                    Some(Tlv::null()),
                );
                let key = Tlv::sequence(&[Tlv::integer(modulus), Tlv::integer(public_exponent)]);
                Ok(Tlv::sequence(&[algorithm.to_tlv(), Tlv::bit_string(&key.to_der())]).to_der())
            }
        }
    }

    /// Parse a SubjectPublicKeyInfo holding an EC or RSA key
    pub fn from_spki(der: &[u8]) -> Result<Self> {
        let spki = Tlv::from_der(der)?;
        spki.expect_tag(tag::SEQUENCE, "SubjectPublicKeyInfo")?;
        let children = spki.children()?;
        let algorithm = match children.first() {
            Some(alg) => AlgorithmIdentifier::from_tlv(alg)?,
            None => {
                return Err(Error::invalid_argument(
                    "SubjectPublicKeyInfo",
                    "empty sequence",
                ))
            }
        };
        if algorithm.algorithm().is(oids::EC_PUBLIC_KEY) {
            return Ok(Self::Ec(EcPublicKey::from_spki(der)?));
        }
        if !algorithm.algorithm().is(oids::RSA_ENCRYPTION) {
            return Err(Error::invalid_argument(
                "SubjectPublicKeyInfo",
                format!("unsupported key algorithm {}", algorithm.algorithm()),
            ));
        }
        let bits = children
            .get(1)
            .ok_or_else(|| Error::invalid_argument("SubjectPublicKeyInfo", "missing key"))?
            .as_bit_string()?;
        let key = Tlv::from_der(bits)?.children()?;
        match key.as_slice() {
            [n, e] => Ok(Self::Rsa {
                modulus: n.as_integer()?,
                public_exponent: e.as_integer()?,
            }),
            _ => Err(Error::invalid_argument(
                "RSAPublicKey",
                "expected modulus and exponent",
            )),
        }
    }
}

/// Exported key together with the certificate describing it
///
/// This is what moves between cluster members during key distribution.
/// The certificate carries the public key, the validity period and the
/// issuer, so the receiving side recreates an identical entry.
#[derive(Clone)]
pub struct KeyPackage {
    private_key: EcPrivateKey,
    certificate: X509Certificate,
    issuer_alias: Option<String>,
}

impl KeyPackage {
    /// Bundle a private key with its certificate
    ///
    /// The certificate must certify the public key belonging to `private_key`.
    pub fn new(
        private_key: EcPrivateKey,
        certificate: X509Certificate,
        issuer_alias: Option<String>,
    ) -> Result<Self> {
        let public = certificate.public_key()?;
        let matches = match public.as_ec() {
            Some(ec) => ec.params() == private_key.params() && derive_public(&private_key)? == *ec,
            None => false,
        };
        if !matches {
            return Err(Error::invalid_argument(
                "key package",
                "certificate does not belong to the private key",
            ));
        }
        Ok(Self {
            private_key,
            certificate,
            issuer_alias,
        })
    }

    /// The private key
    pub fn private_key(&self) -> &EcPrivateKey {
        &self.private_key
    }

    /// The key certificate
    pub fn certificate(&self) -> &X509Certificate {
        &self.certificate
    }

    /// Alias of the key that signed the certificate, when not self-signed
    pub fn issuer_alias(&self) -> Option<&str> {
        self.issuer_alias.as_deref()
    }
}

impl fmt::Debug for KeyPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPackage")
            .field("subject", &self.certificate.subject())
            .field("issuer_alias", &self.issuer_alias)
            .finish_non_exhaustive()
    }
}

/// Public key `d·G` for a private key
pub(crate) fn derive_public(private_key: &EcPrivateKey) -> Result<EcPublicKey> {
    let params = private_key.params();
    let point = eidcrypt_algorithms::ec::multiply_ec_point(
        params.generator(),
        &private_key.scalar(),
        params.a(),
        params.prime(),
    )?;
    Ok(EcPublicKey::new(point, params.clone())?)
}
