//! AES key derivation for secure messaging (BSI TR-03110, part 3, A.2.3)
//!
//! `K = H(secret || nonce || counter)` with a 32-bit big-endian counter.
//! SHA-1 serves AES-128 and SHA-256 serves AES-192/256; the digest is cut
//! to the key length.

use eidcrypt_params::utils::symmetric::{
    AES128_KEY_SIZE, AES_KEY_SIZES, KDF_COUNTER_ENC, KDF_COUNTER_MAC, KDF_COUNTER_PASSWORD,
};
use zeroize::Zeroize;

use crate::cipher::SecretKey;
use crate::error::{validate, Result};
use crate::hash::DigestAlgorithm;

/// Key derivation function for one AES key size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AesKdf {
    key_size: usize,
    digest: DigestAlgorithm,
}

impl AesKdf {
    /// KDF producing keys of `key_size` bytes (16, 24 or 32)
    pub fn new(key_size: usize) -> Result<Self> {
        validate::one_of_lengths("derived AES key", key_size, &AES_KEY_SIZES)?;
        let digest = if key_size == AES128_KEY_SIZE {
            DigestAlgorithm::Sha1
        } else {
            DigestAlgorithm::Sha256
        };
        Ok(Self { key_size, digest })
    }

    /// Size of the derived keys in bytes
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Digest backing this KDF
    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }

    /// Session encryption key `K_enc`
    pub fn derive_enc_key(&self, secret: &[u8], nonce: Option<&[u8]>) -> Result<SecretKey> {
        self.derive(secret, nonce, KDF_COUNTER_ENC)
    }

    /// Session MAC key `K_mac`
    pub fn derive_mac_key(&self, secret: &[u8], nonce: Option<&[u8]>) -> Result<SecretKey> {
        self.derive(secret, nonce, KDF_COUNTER_MAC)
    }

    /// Key `K_π` derived from a CAN, PIN or PUK
    pub fn derive_password_key(&self, secret: &[u8]) -> Result<SecretKey> {
        self.derive(secret, None, KDF_COUNTER_PASSWORD)
    }

    fn derive(&self, secret: &[u8], nonce: Option<&[u8]>, counter: u32) -> Result<SecretKey> {
        validate::parameter(!secret.is_empty(), "key derivation data", "must not be empty")?;
        let counter = counter.to_be_bytes();
        let mut hash = self
            .digest
            .digest_parts(&[secret, nonce.unwrap_or_default(), &counter]);
        let key = SecretKey::aes(&hash[..self.key_size]);
        hash.zeroize();
        Ok(key)
    }
}
