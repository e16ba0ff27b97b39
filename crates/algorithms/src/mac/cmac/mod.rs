//! CMAC (NIST SP 800-38B) over a 128-bit block cipher
//!
//! Arbitrary-length input is supported; the final partial block is padded
//! with `10*` internally and masked with the second subkey, a complete
//! final block with the first one.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::block::BlockCipher;
use crate::error::{validate, Error, Result};

const BLOCK: usize = 16;

/// Reduction constant for 128-bit blocks
const RB: u8 = 0x87;

/// Doubling in GF(2¹²⁸) as used for subkey derivation
fn dbl(block: &[u8; BLOCK]) -> [u8; BLOCK] {
    let mut out = [0u8; BLOCK];
    let mut carry = 0u8;
    for i in (0..BLOCK).rev() {
        out[i] = (block[i] << 1) | carry;
        carry = block[i] >> 7;
    }
    // carry is the former MSB; fold in Rb without branching
    out[BLOCK - 1] ^= RB & carry.wrapping_neg();
    out
}

/// Streaming CMAC state
pub struct Cmac<B: BlockCipher> {
    cipher: B,
    k1: [u8; BLOCK],
    k2: [u8; BLOCK],
    state: [u8; BLOCK],
    pending: Vec<u8>,
    is_finalized: bool,
}

impl<B: BlockCipher> Cmac<B> {
    /// Derive the subkeys for `cipher`
    pub fn new(cipher: B) -> Result<Self> {
        validate::length("CMAC block size", B::BLOCK_SIZE, BLOCK)?;
        let mut l = [0u8; BLOCK];
        cipher.encrypt_block(&mut l)?;
        let k1 = dbl(&l);
        let k2 = dbl(&k1);
        l.zeroize();
        Ok(Self {
            cipher,
            k1,
            k2,
            state: [0u8; BLOCK],
            pending: Vec::with_capacity(BLOCK),
            is_finalized: false,
        })
    }

    fn absorb_block(&mut self, block: &[u8]) -> Result<()> {
        for (s, b) in self.state.iter_mut().zip(block) {
            *s ^= b;
        }
        self.cipher.encrypt_block(&mut self.state)
    }

    /// Feed additional `data` into the MAC
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.is_finalized {
            return Err(Error::param("cmac_state", "Cannot update after finalization"));
        }
        self.pending.extend_from_slice(data);
        // the last block is held back until finalize decides on K1 or K2
        while self.pending.len() > BLOCK {
            let block: Vec<u8> = self.pending.drain(..BLOCK).collect();
            self.absorb_block(&block)?;
        }
        Ok(())
    }

    /// Finalise and return the full 16-byte tag
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        if self.is_finalized {
            return Err(Error::param("cmac_state", "CMAC already finalized"));
        }
        self.is_finalized = true;

        let mut last = [0u8; BLOCK];
        if self.pending.len() == BLOCK {
            last.copy_from_slice(&self.pending);
            for (l, k) in last.iter_mut().zip(&self.k1) {
                *l ^= k;
            }
        } else {
            last[..self.pending.len()].copy_from_slice(&self.pending);
            last[self.pending.len()] = 0x80;
            for (l, k) in last.iter_mut().zip(&self.k2) {
                *l ^= k;
            }
        }
        self.pending.zeroize();
        self.absorb_block(&last)?;
        last.zeroize();
        Ok(self.state.to_vec())
    }

    /// One-shot MAC helper
    pub fn mac(cipher: B, data: &[u8]) -> Result<Vec<u8>> {
        let mut cmac = Self::new(cipher)?;
        cmac.update(data)?;
        cmac.finalize()
    }

    /// Constant-time comparison of a possibly truncated `tag`
    ///
    /// The tag must be between 1 and 16 bytes; it is compared against the
    /// same-length prefix of the full CMAC.
    pub fn verify(cipher: B, data: &[u8], tag: &[u8]) -> Result<bool> {
        validate::length_range("CMAC tag", tag.len(), 1, BLOCK)?;
        let expected = Self::mac(cipher, data)?;
        Ok(expected[..tag.len()].ct_eq(tag).into())
    }
}

impl<B: BlockCipher> Drop for Cmac<B> {
    fn drop(&mut self) {
        self.k1.zeroize();
        self.k2.zeroize();
        self.state.zeroize();
        self.pending.zeroize();
    }
}
