//! AES block cipher (FIPS 197)
//!
//! One type serves all three key sizes; the round count follows from the
//! key length given at construction. The S-box is computed from the
//! GF(2⁸) inverse with branchless arithmetic instead of table lookups.

use std::sync::atomic::{compiler_fence, Ordering};

use eidcrypt_params::utils::symmetric::{
    AES128_KEY_SIZE, AES192_KEY_SIZE, AES256_KEY_SIZE, AES_BLOCK_SIZE, AES_KEY_SIZES,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::BlockCipher;
use crate::error::{validate, Result};

/// Round constants for AES key expansion
const RCON: [u32; 11] = [
    0x00000000, 0x01000000, 0x02000000, 0x04000000, 0x08000000, 0x10000000, 0x20000000,
    0x40000000, 0x80000000, 0x1b000000, 0x36000000,
];

/// Multiply two bytes in GF(2⁸) with AES's reduction poly x⁸ + x⁴ + x³ + x + 1
#[inline(always)]
fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut p = 0u8;
    for _ in 0..8 {
        let mask = (b & 1).wrapping_neg();
        p ^= a & mask;
        let hi = a >> 7;
        a = (a << 1) ^ (hi * 0x1B);
        b >>= 1;
    }
    p
}

/// x²⁵⁴ = x⁻¹ in GF(2⁸), with 0 mapped to 0
#[inline(always)]
fn gf_inv(x: u8) -> u8 {
    let mut acc = 1u8;
    let mut sq = x;
    // 254 = 0b1111_1110: multiply in x², x⁴, ..., x¹²⁸
    for _ in 0..7 {
        sq = gf_mul(sq, sq);
        acc = gf_mul(acc, sq);
    }
    acc
}

/// Forward S-box: affine transform of the field inverse
#[inline(always)]
fn sbox(x: u8) -> u8 {
    let i = gf_inv(x);
    i ^ i.rotate_left(1) ^ i.rotate_left(2) ^ i.rotate_left(3) ^ i.rotate_left(4) ^ 0x63
}

/// Inverse S-box: undo the affine transform, then invert
#[inline(always)]
fn inv_sbox(x: u8) -> u8 {
    let y = x ^ 0x63;
    gf_inv(y.rotate_left(1) ^ y.rotate_left(3) ^ y.rotate_left(6))
}

#[inline(always)]
fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

#[inline(always)]
fn xtime(byte: u8) -> u8 {
    (byte << 1) ^ ((byte >> 7) * 0x1B)
}

/// AES with a 128, 192 or 256 bit key
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes {
    round_keys: Vec<u8>,
    #[zeroize(skip)]
    rounds: usize,
}

impl core::fmt::Debug for Aes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Aes").field("rounds", &self.rounds).finish_non_exhaustive()
    }
}

impl Aes {
    /// Expand `key` into the round key schedule
    ///
    /// The key must be 16, 24 or 32 bytes long.
    pub fn new(key: &[u8]) -> Result<Self> {
        validate::one_of_lengths("AES key", key.len(), &AES_KEY_SIZES)?;
        let nk = key.len() / 4;
        let rounds = nk + 6;
        let total = 4 * (rounds + 1);

        let mut words = vec![0u32; total];
        for (i, chunk) in key.chunks_exact(4).enumerate() {
            words[i] = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        for i in nk..total {
            let mut temp = words[i - 1];
            if i % nk == 0 {
                temp = sub_word(temp.rotate_left(8)) ^ RCON[i / nk];
            } else if nk > 6 && i % nk == 4 {
                temp = sub_word(temp);
            }
            words[i] = words[i - nk] ^ temp;
        }

        let mut round_keys = Vec::with_capacity(total * 4);
        for w in &words {
            round_keys.extend_from_slice(&w.to_be_bytes());
        }
        words.zeroize();

        Ok(Self { round_keys, rounds })
    }

    /// Key size in bytes this instance was created with
    pub fn key_size(&self) -> usize {
        (self.rounds - 6) * 4
    }

    fn round_key(&self, round: usize) -> &[u8] {
        &self.round_keys[round * AES_BLOCK_SIZE..(round + 1) * AES_BLOCK_SIZE]
    }

    fn add_round_key(state: &mut [u8; 16], round_key: &[u8]) {
        for (s, k) in state.iter_mut().zip(round_key) {
            *s ^= k;
        }
    }

    fn sub_bytes(state: &mut [u8; 16]) {
        for byte in state.iter_mut() {
            *byte = sbox(*byte);
        }
        compiler_fence(Ordering::SeqCst);
    }

    fn inv_sub_bytes(state: &mut [u8; 16]) {
        for byte in state.iter_mut() {
            *byte = inv_sbox(*byte);
        }
        compiler_fence(Ordering::SeqCst);
    }

    /// Row r of the column-major state rotates left by r
    fn shift_rows(state: &mut [u8; 16]) {
        let old = *state;
        for c in 0..4 {
            for r in 1..4 {
                state[4 * c + r] = old[4 * ((c + r) % 4) + r];
            }
        }
    }

    fn inv_shift_rows(state: &mut [u8; 16]) {
        let old = *state;
        for c in 0..4 {
            for r in 1..4 {
                state[4 * ((c + r) % 4) + r] = old[4 * c + r];
            }
        }
    }

    fn mix_columns(state: &mut [u8; 16]) {
        for col in state.chunks_exact_mut(4) {
            let [s0, s1, s2, s3] = [col[0], col[1], col[2], col[3]];
            let all = s0 ^ s1 ^ s2 ^ s3;
            col[0] = s0 ^ all ^ xtime(s0 ^ s1);
            col[1] = s1 ^ all ^ xtime(s1 ^ s2);
            col[2] = s2 ^ all ^ xtime(s2 ^ s3);
            col[3] = s3 ^ all ^ xtime(s3 ^ s0);
        }
    }

    fn inv_mix_columns(state: &mut [u8; 16]) {
        for col in state.chunks_exact_mut(4) {
            let [s0, s1, s2, s3] = [col[0], col[1], col[2], col[3]];
            col[0] = gf_mul(s0, 14) ^ gf_mul(s1, 11) ^ gf_mul(s2, 13) ^ gf_mul(s3, 9);
            col[1] = gf_mul(s0, 9) ^ gf_mul(s1, 14) ^ gf_mul(s2, 11) ^ gf_mul(s3, 13);
            col[2] = gf_mul(s0, 13) ^ gf_mul(s1, 9) ^ gf_mul(s2, 14) ^ gf_mul(s3, 11);
            col[3] = gf_mul(s0, 11) ^ gf_mul(s1, 13) ^ gf_mul(s2, 9) ^ gf_mul(s3, 14);
        }
    }
}

impl BlockCipher for Aes {
    const BLOCK_SIZE: usize = AES_BLOCK_SIZE;

    fn name(&self) -> &'static str {
        match self.key_size() {
            AES128_KEY_SIZE => "AES-128",
            AES192_KEY_SIZE => "AES-192",
            AES256_KEY_SIZE => "AES-256",
            _ => "AES",
        }
    }

    fn encrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("AES block", block.len(), AES_BLOCK_SIZE)?;

        let mut state = [0u8; 16];
        state.copy_from_slice(block);

        Self::add_round_key(&mut state, self.round_key(0));
        for round in 1..self.rounds {
            Self::sub_bytes(&mut state);
            Self::shift_rows(&mut state);
            Self::mix_columns(&mut state);
            Self::add_round_key(&mut state, self.round_key(round));
        }
        Self::sub_bytes(&mut state);
        Self::shift_rows(&mut state);
        Self::add_round_key(&mut state, self.round_key(self.rounds));

        block.copy_from_slice(&state);
        state.zeroize();
        Ok(())
    }

    fn decrypt_block(&self, block: &mut [u8]) -> Result<()> {
        validate::length("AES block", block.len(), AES_BLOCK_SIZE)?;

        let mut state = [0u8; 16];
        state.copy_from_slice(block);

        Self::add_round_key(&mut state, self.round_key(self.rounds));
        for round in (1..self.rounds).rev() {
            Self::inv_shift_rows(&mut state);
            Self::inv_sub_bytes(&mut state);
            Self::add_round_key(&mut state, self.round_key(round));
            Self::inv_mix_columns(&mut state);
        }
        Self::inv_shift_rows(&mut state);
        Self::inv_sub_bytes(&mut state);
        Self::add_round_key(&mut state, self.round_key(0));

        block.copy_from_slice(&state);
        state.zeroize();
        Ok(())
    }
}

#[cfg(test)]
mod tests;
