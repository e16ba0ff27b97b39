//! Electronic Codebook (ECB) mode
//!
//! Used only to encrypt single, never-repeating blocks such as the send
//! sequence counter.

use crate::block::BlockCipher;
use crate::error::{validate, Result};

/// ECB mode over a block cipher
pub struct Ecb<B: BlockCipher> {
    cipher: B,
}

impl<B: BlockCipher> Ecb<B> {
    /// Wrap a keyed cipher
    pub fn new(cipher: B) -> Self {
        Self { cipher }
    }

    /// Encrypt block-aligned data
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        validate::block_multiple("ECB plaintext", plaintext.len(), B::BLOCK_SIZE)?;
        let mut out = plaintext.to_vec();
        for block in out.chunks_exact_mut(B::BLOCK_SIZE) {
            self.cipher.encrypt_block(block)?;
        }
        Ok(out)
    }

    /// Decrypt block-aligned data
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        validate::block_multiple("ECB ciphertext", ciphertext.len(), B::BLOCK_SIZE)?;
        let mut out = ciphertext.to_vec();
        for block in out.chunks_exact_mut(B::BLOCK_SIZE) {
            self.cipher.decrypt_block(block)?;
        }
        Ok(out)
    }
}
