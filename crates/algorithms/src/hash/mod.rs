//! Message digests
//!
//! Digest selection by JCA-style name or by hash OID. The SHA family
//! itself comes from the RustCrypto `sha1` / `sha2` crates; this module
//! only maps identifiers onto them.

use core::fmt;

use eidcrypt_params::traditional::oids;
use eidcrypt_params::utils::hash::{
    SHA1_OUTPUT_SIZE, SHA224_OUTPUT_SIZE, SHA256_OUTPUT_SIZE, SHA384_OUTPUT_SIZE,
    SHA512_OUTPUT_SIZE,
};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::asn1::Oid;
use crate::error::{Error, Result};

/// Digest algorithms used by Terminal Authentication and certificate issuance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// SHA-1
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl DigestAlgorithm {
    /// All supported digests
    pub const ALL: [DigestAlgorithm; 5] = [
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ];

    /// Resolve a digest from its name
    ///
    /// Accepts the JCA spelling (`SHA-256`) as well as the hyphenless
    /// form (`SHA256`), case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        let canon: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();
        match canon.as_str() {
            "SHA1" => Ok(Self::Sha1),
            "SHA224" => Ok(Self::Sha224),
            "SHA256" => Ok(Self::Sha256),
            "SHA384" => Ok(Self::Sha384),
            "SHA512" => Ok(Self::Sha512),
            _ => Err(Error::not_supported(format!("digest '{}'", name))),
        }
    }

    /// Resolve a digest from its hash algorithm OID
    pub fn from_oid(oid: &Oid) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| oid.is(d.oid_arcs()))
            .ok_or_else(|| Error::not_supported(format!("digest OID {}", oid)))
    }

    /// JCA standard name
    pub fn jca_name(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA-1",
            Self::Sha224 => "SHA-224",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Arcs of the hash algorithm OID
    pub fn oid_arcs(&self) -> &'static [u64] {
        match self {
            Self::Sha1 => oids::SHA1,
            Self::Sha224 => oids::SHA224,
            Self::Sha256 => oids::SHA256,
            Self::Sha384 => oids::SHA384,
            Self::Sha512 => oids::SHA512,
        }
    }

    /// Output length in bytes
    pub fn output_size(&self) -> usize {
        match self {
            Self::Sha1 => SHA1_OUTPUT_SIZE,
            Self::Sha224 => SHA224_OUTPUT_SIZE,
            Self::Sha256 => SHA256_OUTPUT_SIZE,
            Self::Sha384 => SHA384_OUTPUT_SIZE,
            Self::Sha512 => SHA512_OUTPUT_SIZE,
        }
    }

    /// Hash `data` in one shot
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        self.digest_parts(&[data])
    }

    /// Hash the concatenation of `parts` without building it
    pub fn digest_parts(&self, parts: &[&[u8]]) -> Vec<u8> {
        fn run<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
            let mut hasher = D::new();
            for part in parts {
                hasher.update(part);
            }
            hasher.finalize().to_vec()
        }
        match self {
            Self::Sha1 => run::<Sha1>(parts),
            Self::Sha224 => run::<Sha224>(parts),
            Self::Sha256 => run::<Sha256>(parts),
            Self::Sha384 => run::<Sha384>(parts),
            Self::Sha512 => run::<Sha512>(parts),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.jca_name())
    }
}
