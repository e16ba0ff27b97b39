//! Signature algorithm identifiers
//!
//! One table maps every signature OID the HSM layer accepts onto its JCA
//! name, digest and key family. Terminal Authentication OIDs demand the
//! plain `r || s` signature format; X.509 and RSA identifiers keep
//! whatever the signer produces.

use eidcrypt_params::traditional::oids;

use crate::asn1::Oid;
use crate::error::{Error, Result};
use crate::hash::DigestAlgorithm;

/// Key family a signature algorithm runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureKind {
    /// ECDSA over a prime curve
    Ecdsa,
    /// RSASSA-PKCS1-v1_5
    RsaPkcs1,
    /// RSASSA-PSS
    RsaPss,
}

impl SignatureKind {
    /// Whether keys of this family are elliptic-curve keys
    pub fn is_ec(&self) -> bool {
        matches!(self, SignatureKind::Ecdsa)
    }
}

/// Registry entry for one signature OID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureAlgorithm {
    /// OID arcs
    pub oid: &'static [u64],
    /// JCA-style name, e.g. `SHA256withECDSA`
    pub jca_name: &'static str,
    /// Message digest
    pub digest: DigestAlgorithm,
    /// Key family
    pub kind: SignatureKind,
    /// Whether DER signatures must be converted to `r || s`
    pub needs_raw_conversion: bool,
}

const fn entry(
    oid: &'static [u64],
    jca_name: &'static str,
    digest: DigestAlgorithm,
    kind: SignatureKind,
    needs_raw_conversion: bool,
) -> SignatureAlgorithm {
    SignatureAlgorithm {
        oid,
        jca_name,
        digest,
        kind,
        needs_raw_conversion,
    }
}

use DigestAlgorithm::{Sha1, Sha224, Sha256, Sha384, Sha512};
use SignatureKind::{Ecdsa, RsaPkcs1, RsaPss};

/// Every supported signature algorithm
pub const SIGNATURE_ALGORITHMS: &[SignatureAlgorithm] = &[
    entry(oids::TA_ECDSA_SHA_1, "SHA1withECDSA", Sha1, Ecdsa, true),
    entry(oids::TA_ECDSA_SHA_224, "SHA224withECDSA", Sha224, Ecdsa, true),
    entry(oids::TA_ECDSA_SHA_256, "SHA256withECDSA", Sha256, Ecdsa, true),
    entry(oids::TA_ECDSA_SHA_384, "SHA384withECDSA", Sha384, Ecdsa, true),
    entry(oids::TA_ECDSA_SHA_512, "SHA512withECDSA", Sha512, Ecdsa, true),
    entry(oids::TA_RSA_V1_5_SHA_1, "SHA1withRSA", Sha1, RsaPkcs1, false),
    entry(oids::TA_RSA_V1_5_SHA_256, "SHA256withRSA", Sha256, RsaPkcs1, false),
    entry(oids::TA_RSA_V1_5_SHA_512, "SHA512withRSA", Sha512, RsaPkcs1, false),
    entry(oids::TA_RSA_PSS_SHA_1, "SHA1withRSA/PSS", Sha1, RsaPss, false),
    entry(oids::TA_RSA_PSS_SHA_256, "SHA256withRSA/PSS", Sha256, RsaPss, false),
    entry(oids::TA_RSA_PSS_SHA_512, "SHA512withRSA/PSS", Sha512, RsaPss, false),
    entry(oids::SHA256_WITH_RSA_ENCRYPTION, "SHA256withRSA", Sha256, RsaPkcs1, false),
    entry(oids::ECDSA_WITH_SHA224, "SHA224withECDSA", Sha224, Ecdsa, false),
    entry(oids::ECDSA_WITH_SHA256, "SHA256withECDSA", Sha256, Ecdsa, false),
    entry(oids::ECDSA_WITH_SHA384, "SHA384withECDSA", Sha384, Ecdsa, false),
    entry(oids::ECDSA_WITH_SHA512, "SHA512withECDSA", Sha512, Ecdsa, false),
];

impl SignatureAlgorithm {
    /// Find the entry for `oid`
    pub fn from_oid(oid: &Oid) -> Result<&'static SignatureAlgorithm> {
        SIGNATURE_ALGORITHMS
            .iter()
            .find(|alg| oid.is(alg.oid))
            .ok_or_else(|| Error::param("signature algorithm", format!("unknown OID {}", oid)))
    }

    /// The OID as a value
    pub fn oid(&self) -> Result<Oid> {
        Oid::from_arcs(self.oid)
    }
}

/// X.509 ECDSA signature algorithm for a curve of `field_bits` bits
///
/// Up to 224 bits use SHA-224, 256 bits SHA-256, 320 and 384 bits SHA-384,
/// everything else SHA-512.
pub fn x509_ecdsa_for_field_size(field_bits: usize) -> &'static SignatureAlgorithm {
    let oid = match field_bits {
        0..=224 => oids::ECDSA_WITH_SHA224,
        256 => oids::ECDSA_WITH_SHA256,
        320 | 384 => oids::ECDSA_WITH_SHA384,
        _ => oids::ECDSA_WITH_SHA512,
    };
    // last four entries are the X.509 ones
    SIGNATURE_ALGORITHMS
        .iter()
        .rev()
        .find(|alg| alg.oid == oid)
        .unwrap_or(&SIGNATURE_ALGORITHMS[SIGNATURE_ALGORITHMS.len() - 1])
}

#[cfg(test)]
mod tests;
