//! Secure-messaging session state
//!
//! The send sequence counter (SSC) is an unsigned big-endian integer of
//! fixed width that counts up once per APDU and wraps to zero. AES secure
//! messaging derives the CBC IV of each command from it as
//! `AES-ECB(K_enc, SSC)` and prefixes it to the MAC input.

use eidcrypt_params::utils::symmetric::AES_IV_LENGTH;

use crate::cipher::{encipher_aes, SecretKey, ALGORITHM_AES};
use crate::error::{validate, Result};

/// Fixed-width wrapping counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSequenceCounter {
    bytes: Vec<u8>,
}

impl SendSequenceCounter {
    /// Start from the given big-endian value; its length fixes the width
    pub fn new(initial: &[u8]) -> Result<Self> {
        validate::parameter(!initial.is_empty(), "SSC", "must not be empty")?;
        Ok(Self {
            bytes: initial.to_vec(),
        })
    }

    /// An all-zero counter of AES block width, as set after Chip Authentication
    pub fn zero() -> Self {
        Self {
            bytes: vec![0u8; AES_IV_LENGTH],
        }
    }

    /// Width in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the counter has zero width; never true for a constructed counter
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Add one, wrapping to zero when every byte overflows
    pub fn increment(&mut self) {
        for byte in self.bytes.iter_mut().rev() {
            let (next, overflow) = byte.overflowing_add(1);
            *byte = next;
            if !overflow {
                break;
            }
        }
    }

    /// Current counter bytes, used as the CMAC prefix
    pub fn as_iv(&self) -> &[u8] {
        &self.bytes
    }

    /// IV for the next encryption: the counter enciphered with `k_enc`
    pub fn encrypted_iv(&self, k_enc: &SecretKey) -> Result<Vec<u8>> {
        validate::parameter(
            k_enc.algorithm() == ALGORITHM_AES,
            "encryption key",
            "only AES keys permitted",
        )?;
        encipher_aes("AES/ECB/NoPadding", k_enc, None, &self.bytes)
    }
}

/// Session keys plus counter of one AES secure-messaging channel
#[derive(Debug, Clone)]
pub struct AesKeyMaterial {
    enc_key: SecretKey,
    mac_key: SecretKey,
    ssc: SendSequenceCounter,
}

impl AesKeyMaterial {
    /// Bundle session keys of equal strength with a block-wide counter
    pub fn new(enc_key: SecretKey, mac_key: SecretKey, ssc: SendSequenceCounter) -> Result<Self> {
        validate::parameter(
            enc_key.algorithm() == ALGORITHM_AES,
            "encryption key",
            "only AES keys permitted",
        )?;
        validate::parameter(
            mac_key.algorithm() == ALGORITHM_AES,
            "MAC key",
            "only AES keys permitted",
        )?;
        validate::parameter(
            enc_key.len() == mac_key.len(),
            "session keys",
            "encryption and MAC keys differ in strength",
        )?;
        validate::length("SSC", ssc.len(), AES_IV_LENGTH)?;
        Ok(Self {
            enc_key,
            mac_key,
            ssc,
        })
    }

    /// `K_enc`
    pub fn enc_key(&self) -> &SecretKey {
        &self.enc_key
    }

    /// `K_mac`
    pub fn mac_key(&self) -> &SecretKey {
        &self.mac_key
    }

    /// The channel's counter
    pub fn ssc(&self) -> &SendSequenceCounter {
        &self.ssc
    }

    /// Mutable access for per-APDU increments
    pub fn ssc_mut(&mut self) -> &mut SendSequenceCounter {
        &mut self.ssc
    }
}
