//! Cipher Block Chaining (CBC) mode implementation
//!
//! CBC mode XORs each plaintext block with the previous ciphertext block
//! before encryption; the first block is XORed with the IV. Follows
//! NIST SP 800-38A.

use zeroize::Zeroize;

use crate::block::BlockCipher;
use crate::error::{validate, Result};

/// CBC mode implementation
pub struct Cbc<B: BlockCipher> {
    cipher: B,
    iv: Vec<u8>,
}

impl<B: BlockCipher> Cbc<B> {
    /// Creates a new CBC mode instance with the given cipher and IV
    ///
    /// The IV must be exactly one block long.
    pub fn new(cipher: B, iv: &[u8]) -> Result<Self> {
        validate::length("CBC initialization vector", iv.len(), B::BLOCK_SIZE)?;
        Ok(Self {
            cipher,
            iv: iv.to_vec(),
        })
    }

    /// Encrypts a message using CBC mode
    ///
    /// The plaintext must be a multiple of the block size.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        validate::block_multiple("CBC plaintext", plaintext.len(), B::BLOCK_SIZE)?;

        let mut ciphertext = Vec::with_capacity(plaintext.len());
        let mut prev_block = self.iv.clone();

        for chunk in plaintext.chunks(B::BLOCK_SIZE) {
            let mut block = chunk.to_vec();
            for (b, p) in block.iter_mut().zip(&prev_block) {
                *b ^= p;
            }
            self.cipher.encrypt_block(&mut block)?;
            ciphertext.extend_from_slice(&block);
            prev_block = block;
        }

        Ok(ciphertext)
    }

    /// Decrypts a message using CBC mode
    ///
    /// The ciphertext must be a multiple of the block size.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        validate::block_multiple("CBC ciphertext", ciphertext.len(), B::BLOCK_SIZE)?;

        let mut plaintext = Vec::with_capacity(ciphertext.len());
        let mut prev_block = self.iv.clone();

        for chunk in ciphertext.chunks(B::BLOCK_SIZE) {
            let mut block = chunk.to_vec();
            self.cipher.decrypt_block(&mut block)?;
            for (b, p) in block.iter_mut().zip(&prev_block) {
                *b ^= p;
            }
            plaintext.extend_from_slice(&block);
            block.zeroize();
            prev_block = chunk.to_vec();
        }

        Ok(plaintext)
    }
}
