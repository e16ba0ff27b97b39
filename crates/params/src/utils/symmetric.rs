//! Constants for symmetric encryption and secure messaging

/// AES-128 key size in bytes
pub const AES128_KEY_SIZE: usize = 16;

/// AES-192 key size in bytes
pub const AES192_KEY_SIZE: usize = 24;

/// AES-256 key size in bytes
pub const AES256_KEY_SIZE: usize = 32;

/// Accepted AES key sizes in bytes
pub const AES_KEY_SIZES: [usize; 3] = [AES128_KEY_SIZE, AES192_KEY_SIZE, AES256_KEY_SIZE];

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// IV length required by every non-ECB AES mode
pub const AES_IV_LENGTH: usize = AES_BLOCK_SIZE;

/// Full AES-CMAC tag size in bytes
pub const CMAC_MAX_LENGTH: usize = AES_BLOCK_SIZE;

/// Shortest permitted truncated CMAC
pub const CMAC_MIN_LENGTH: usize = 1;

/// CMAC length used by secure messaging when none is requested
pub const CMAC_DEFAULT_LENGTH: usize = 8;

/// Key derivation counter for encryption keys
pub const KDF_COUNTER_ENC: u32 = 1;

/// Key derivation counter for MAC keys
pub const KDF_COUNTER_MAC: u32 = 2;

/// Key derivation counter for password-derived keys
pub const KDF_COUNTER_PASSWORD: u32 = 3;
