//! Minimal X.509 certificates for HSM keys
//!
//! Every generated key gets a certificate with `CN=<alias>` as subject,
//! the current time in milliseconds as serial number and a validity period
//! counted in months. The certificate is the record of when a key was
//! generated and when it expires; no extensions are written.
//!
//! Software keys sign certificates with ECDSA; token keys may also sign
//! with RSA. Verification here covers ECDSA only.

use chrono::{DateTime, Datelike, Months, NaiveDateTime, TimeZone, Utc};
use eidcrypt_algorithms::asn1::{tag, AlgorithmIdentifier, Oid, Tlv};
use eidcrypt_algorithms::ec::{sign_raw, verify_signature, EcdsaSignature};
use eidcrypt_algorithms::registry::{x509_ecdsa_for_field_size, SignatureAlgorithm};
use eidcrypt_algorithms::{EcDomainParameters, EcPrivateKey, EcPublicKey};
use eidcrypt_api::{Error, Result};
use eidcrypt_params::traditional::oids;
use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};

use crate::keys::PublicKey;

const X509_V3: u64 = 2;

/// Certificate contents before signing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateTemplate {
    subject: String,
    issuer: String,
    serial: BigUint,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
}

impl CertificateTemplate {
    /// Self-issued template for `alias`, valid from now for `lifespan_months`
    pub fn new(alias: &str, lifespan_months: u32) -> Result<Self> {
        let now = Utc::now();
        let not_before = Utc
            .timestamp_opt(now.timestamp(), 0)
            .single()
            .ok_or_else(|| Error::hsm("certificate", "clock out of range"))?;
        let not_after = not_before
            .checked_add_months(Months::new(lifespan_months))
            .ok_or_else(|| {
                Error::invalid_argument(
                    "certificate",
                    format!("lifespan of {} months out of range", lifespan_months),
                )
            })?;
        let millis = u64::try_from(now.timestamp_millis())
            .map_err(|_| Error::hsm("certificate", "clock before epoch"))?;
        Ok(Self {
            subject: alias.to_string(),
            issuer: alias.to_string(),
            serial: BigUint::from(millis),
            not_before,
            not_after,
        })
    }

    /// Name the issuing key
    pub fn issued_by(mut self, issuer: &str) -> Self {
        self.issuer = issuer.to_string();
        self
    }

    /// Subject common name
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Issuer common name
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Start of validity
    pub fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    /// End of validity
    pub fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    /// DER TBSCertificate for `subject_key` under `algorithm`
    pub fn to_be_signed(
        &self,
        subject_key: &PublicKey,
        algorithm: &SignatureAlgorithm,
    ) -> Result<Vec<u8>> {
        let spki = Tlv::from_der(&subject_key.encoded()?)?;
        Ok(Tlv::sequence(&[
            Tlv::constructed(tag::CONTEXT_0, &[Tlv::small_integer(X509_V3)]),
            Tlv::integer(&self.serial),
            signature_algorithm_tlv(algorithm)?,
            encode_name(&self.issuer)?,
            Tlv::sequence(&[encode_time(&self.not_before), encode_time(&self.not_after)]),
            encode_name(&self.subject)?,
            spki,
        ])
        .to_der())
    }

    /// Sign with a software EC key
    ///
    /// The signature algorithm follows the issuer's field size.
    pub fn sign<R: CryptoRng + RngCore>(
        &self,
        subject_key: &PublicKey,
        issuer_key: &EcPrivateKey,
        rng: &mut R,
    ) -> Result<X509Certificate> {
        let algorithm = certificate_algorithm(issuer_key.params());
        let tbs = self.to_be_signed(subject_key, algorithm)?;
        let raw = sign_raw(issuer_key, &tbs, algorithm.digest, rng)?;
        let signature = EcdsaSignature::from_raw(&raw)?.to_der();
        X509Certificate::assemble(&tbs, algorithm, &signature)
    }
}

/// Certificate signature algorithm for keys on `params`
pub fn certificate_algorithm(params: &EcDomainParameters) -> &'static SignatureAlgorithm {
    x509_ecdsa_for_field_size(params.field_size_bits())
}

/// Decoded X.509 certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X509Certificate {
    der: Vec<u8>,
    tbs: Vec<u8>,
    serial: BigUint,
    issuer: String,
    subject: String,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    spki: Vec<u8>,
    signature_algorithm: Oid,
    signature: Vec<u8>,
}

impl X509Certificate {
    /// Join a TBSCertificate and its DER signature into a certificate
    pub fn assemble(
        tbs: &[u8],
        algorithm: &SignatureAlgorithm,
        signature: &[u8],
    ) -> Result<Self> {
        let der = Tlv::sequence(&[
            Tlv::from_der(tbs)?,
            signature_algorithm_tlv(algorithm)?,
            Tlv::bit_string(signature),
        ])
        .to_der();
        Self::from_der(&der)
    }

    /// Parse a DER certificate
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let cert = Tlv::from_der(der)?;
        cert.expect_tag(tag::SEQUENCE, "Certificate")?;
        let parts = cert.children()?;
        let (tbs, algorithm, signature) = match parts.as_slice() {
            [tbs, algorithm, signature] => (tbs, algorithm, signature),
            _ => return Err(malformed("expected tbsCertificate, algorithm and signature")),
        };
        tbs.expect_tag(tag::SEQUENCE, "TBSCertificate")?;

        let mut fields = tbs.children()?.into_iter().peekable();
        if fields.peek().map(Tlv::tag) == Some(tag::CONTEXT_0) {
            fields.next();
        }
        let mut next = |what: &'static str| {
            fields
                .next()
                .ok_or_else(|| malformed(format!("missing {}", what)))
        };
        let serial = next("serialNumber")?.as_integer()?;
        next("signature")?;
        let issuer = decode_name(&next("issuer")?)?;
        let validity = next("validity")?.children()?;
        let (not_before, not_after) = match validity.as_slice() {
            [from, to] => (decode_time(from)?, decode_time(to)?),
            _ => return Err(malformed("validity needs two times")),
        };
        let subject = decode_name(&next("subject")?)?;
        let spki = next("subjectPublicKeyInfo")?.to_der();

        Ok(Self {
            der: der.to_vec(),
            tbs: tbs.to_der(),
            serial,
            issuer,
            subject,
            not_before,
            not_after,
            spki,
            signature_algorithm: AlgorithmIdentifier::from_tlv(algorithm)?.algorithm().clone(),
            signature: signature.as_bit_string()?.to_vec(),
        })
    }

    /// DER encoding
    pub fn to_der(&self) -> &[u8] {
        &self.der
    }

    /// Serial number
    pub fn serial(&self) -> &BigUint {
        &self.serial
    }

    /// Issuer common name
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Subject common name
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Start of validity, the key's generation date
    pub fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    /// End of validity, the key's expiration date
    pub fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    /// Certificate signature algorithm OID
    pub fn signature_algorithm(&self) -> &Oid {
        &self.signature_algorithm
    }

    /// Whether subject and issuer name are the same
    pub fn is_self_issued(&self) -> bool {
        self.subject == self.issuer
    }

    /// Certified public key
    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_spki(&self.spki)
    }

    /// Check the ECDSA signature against the issuer's public key
    pub fn verify(&self, issuer_key: &EcPublicKey) -> bool {
        let algorithm = match SignatureAlgorithm::from_oid(&self.signature_algorithm) {
            Ok(alg) if alg.kind.is_ec() => alg,
            _ => return false,
        };
        let raw = match EcdsaSignature::from_der(&self.signature)
            .and_then(|sig| sig.to_raw(issuer_key.params().signature_component_len()))
        {
            Ok(raw) => raw,
            Err(_) => return false,
        };
        verify_signature(&raw, &self.tbs, issuer_key, algorithm.digest.jca_name())
    }
}

fn malformed(details: impl Into<String>) -> Error {
    Error::invalid_argument("X.509 certificate", details)
}

/// ECDSA identifiers omit the parameters, RSA ones carry NULL
fn signature_algorithm_tlv(algorithm: &SignatureAlgorithm) -> Result<Tlv> {
    let parameters = (!algorithm.kind.is_ec()).then(Tlv::null);
    Ok(AlgorithmIdentifier::new(algorithm.oid()?, parameters).to_tlv())
}

fn encode_name(common_name: &str) -> Result<Tlv> {
    let attribute = Tlv::sequence(&[
        Tlv::oid(&Oid::from_arcs(oids::COMMON_NAME)?),
        Tlv::utf8_string(common_name),
    ]);
    Ok(Tlv::sequence(&[Tlv::set(&[attribute])]))
}

fn decode_name(name: &Tlv) -> Result<String> {
    name.expect_tag(tag::SEQUENCE, "Name")?;
    for rdn in name.children()? {
        for attribute in rdn.children()? {
            let parts = attribute.children()?;
            if let [kind, value] = parts.as_slice() {
                if kind.as_oid()?.is(oids::COMMON_NAME) {
                    return match value.tag() {
                        tag::UTF8_STRING | tag::PRINTABLE_STRING => {
                            String::from_utf8(value.value().to_vec())
                                .map_err(|_| malformed("common name is not UTF-8"))
                        }
                        other => Err(malformed(format!("unexpected string tag {:02X}", other))),
                    };
                }
            }
        }
    }
    Err(malformed("name without common name"))
}

/// UTCTime through 2049, GeneralizedTime afterwards (RFC 5280, 4.1.2.5)
fn encode_time(time: &DateTime<Utc>) -> Tlv {
    if (1950..2050).contains(&time.year()) {
        Tlv::new(tag::UTC_TIME, time.format("%y%m%d%H%M%SZ").to_string())
    } else {
        Tlv::new(tag::GENERALIZED_TIME, time.format("%Y%m%d%H%M%SZ").to_string())
    }
}

fn decode_time(time: &Tlv) -> Result<DateTime<Utc>> {
    let text = core::str::from_utf8(time.value()).map_err(|_| malformed("time is not ASCII"))?;
    let full = match time.tag() {
        tag::UTC_TIME => {
            let year: u32 = text
                .get(..2)
                .and_then(|yy| yy.parse().ok())
                .ok_or_else(|| malformed(format!("bad UTCTime {}", text)))?;
            let century = if year < 50 { "20" } else { "19" };
            format!("{}{}", century, text)
        }
        tag::GENERALIZED_TIME => text.to_string(),
        other => return Err(malformed(format!("unexpected time tag {:02X}", other))),
    };
    let naive = NaiveDateTime::parse_from_str(&full, "%Y%m%d%H%M%SZ")
        .map_err(|_| malformed(format!("bad time {}", text)))?;
    Ok(Utc.from_utc_datetime(&naive))
}
