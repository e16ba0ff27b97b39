//! Block ciphers and their modes of operation
//!
//! Only AES is provided. Secure messaging and CMAC need the raw block
//! transform, ECB for send-sequence-counter encryption and CBC for
//! command/response data.

pub mod aes;
pub mod modes;

use crate::error::Result;

// Re-exports
pub use aes::Aes;
pub use modes::{cbc::Cbc, ecb::Ecb};

/// A keyed block transform
pub trait BlockCipher {
    /// Block size in bytes
    const BLOCK_SIZE: usize;

    /// Algorithm name including the key size, e.g. `AES-128`
    fn name(&self) -> &'static str;

    /// Encrypt one block in place
    fn encrypt_block(&self, block: &mut [u8]) -> Result<()>;

    /// Decrypt one block in place
    fn decrypt_block(&self, block: &mut [u8]) -> Result<()>;
}
