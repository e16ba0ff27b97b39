//! AES encipherment and AES-CMAC for secure messaging
//!
//! Transformations use the `ALGORITHM[/MODE[/PADDING]]` notation of the
//! card middleware. Only `AES` with `ECB` or `CBC` and `NoPadding` is
//! accepted; secure messaging pads with ISO/IEC 9797-1 method 2 before it
//! reaches this layer, so `PKCS5Padding` is refused.
//!
//! A missing mode runs as ECB, but only a mode spelled out as `ECB` waives
//! the IV: plain `"AES"` still needs a 16-byte IV, which ECB then ignores.

use core::fmt;
use core::str::FromStr;

use eidcrypt_params::utils::symmetric::{
    AES_BLOCK_SIZE, AES_IV_LENGTH, AES_KEY_SIZES, CMAC_DEFAULT_LENGTH, CMAC_MAX_LENGTH,
    CMAC_MIN_LENGTH,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{Aes, Cbc, Ecb};
use crate::error::{validate, Error, Result};
use crate::mac::Cmac;

/// Key algorithm name for AES keys
pub const ALGORITHM_AES: &str = "AES";

const TRANSFORMATION_SEPARATOR: char = '/';

/// A symmetric key tagged with its algorithm name
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    #[zeroize(skip)]
    algorithm: String,
    bytes: Vec<u8>,
}

impl SecretKey {
    /// Wrap raw key material
    pub fn new(algorithm: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            algorithm: algorithm.into(),
            bytes: bytes.to_vec(),
        }
    }

    /// Wrap raw AES key material
    pub fn aes(bytes: &[u8]) -> Self {
        Self::new(ALGORITHM_AES, bytes)
    }

    /// Algorithm name, e.g. `AES`
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the key has no material at all
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("algorithm", &self.algorithm)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Block mode of a transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockMode {
    /// Electronic codebook, no IV
    Ecb,
    /// Cipher block chaining with a one-block IV
    Cbc,
}

impl BlockMode {
    /// Whether the mode consumes an IV
    pub fn requires_iv(&self) -> bool {
        !matches!(self, BlockMode::Ecb)
    }
}

/// A parsed `ALGORITHM[/MODE[/PADDING]]` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    algorithm: String,
    mode: BlockMode,
    explicit_ecb: bool,
}

impl Transformation {
    /// Key algorithm this transformation expects
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Block mode
    pub fn mode(&self) -> BlockMode {
        self.mode
    }

    /// Whether callers must hand in an IV; only an explicit `ECB` waives it
    pub fn requires_iv(&self) -> bool {
        !self.explicit_ecb
    }
}

impl FromStr for Transformation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        validate::parameter(!s.is_empty(), "transformation", "must not be empty")?;
        let parts: Vec<&str> = s.split(TRANSFORMATION_SEPARATOR).collect();
        if parts.len() > 3 {
            return Err(Error::param(
                "transformation",
                "contains more than three parts",
            ));
        }
        // empty parts count as absent
        let part = |i: usize| parts.get(i).copied().filter(|p| !p.is_empty());

        let algorithm = part(0).ok_or_else(|| Error::param("transformation", "no algorithm"))?;
        if algorithm != ALGORITHM_AES {
            return Err(Error::not_supported(format!("cipher algorithm '{}'", algorithm)));
        }
        let mode = match part(1) {
            None | Some("ECB") => BlockMode::Ecb,
            Some("CBC") => BlockMode::Cbc,
            Some(other) => return Err(Error::not_supported(format!("block mode '{}'", other))),
        };
        match part(2) {
            None | Some("NoPadding") => {}
            Some(other) => return Err(Error::not_supported(format!("padding '{}'", other))),
        }
        Ok(Self {
            algorithm: algorithm.to_string(),
            mode,
            explicit_ecb: part(1) == Some("ECB"),
        })
    }
}

/// Direction of a cipher call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn check_aes_key(key: &SecretKey) -> Result<()> {
    validate::parameter(
        key.algorithm() == ALGORITHM_AES,
        "secret key",
        "key for AES permitted only",
    )?;
    validate::one_of_lengths("AES key", key.len(), &AES_KEY_SIZES)
}

fn run_aes(
    transformation: &str,
    key: &SecretKey,
    iv: Option<&[u8]>,
    data: &[u8],
    direction: Direction,
) -> Result<Vec<u8>> {
    let transformation: Transformation = transformation.parse()?;
    check_aes_key(key)?;
    validate::block_multiple("AES input", data.len(), AES_BLOCK_SIZE)?;

    let iv = iv.filter(|iv| !iv.is_empty());
    if transformation.requires_iv() {
        let iv = iv.ok_or_else(|| {
            Error::param("initialization vector", "required unless the mode is ECB")
        })?;
        validate::length("AES initialization vector", iv.len(), AES_IV_LENGTH)?;
    }

    let aes = Aes::new(key.as_bytes())?;
    match (transformation.mode(), iv) {
        (BlockMode::Ecb, _) => {
            let ecb = Ecb::new(aes);
            match direction {
                Direction::Encrypt => ecb.encrypt(data),
                Direction::Decrypt => ecb.decrypt(data),
            }
        }
        (BlockMode::Cbc, Some(iv)) => {
            let cbc = Cbc::new(aes, iv)?;
            match direction {
                Direction::Encrypt => cbc.encrypt(data),
                Direction::Decrypt => cbc.decrypt(data),
            }
        }
        (BlockMode::Cbc, None) => Err(Error::param("initialization vector", "required for CBC")),
    }
}

/// Encrypt `data` with AES under `transformation`
///
/// `iv` must be 16 bytes unless the transformation names `ECB` explicitly;
/// a bare `"AES"` runs as ECB yet still checks the IV. ECB never uses the
/// IV. `data` must be a multiple of the block size, and `PKCS5Padding` is
/// rejected since callers pad before encrypting.
pub fn encipher_aes(
    transformation: &str,
    key: &SecretKey,
    iv: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>> {
    run_aes(transformation, key, iv, data, Direction::Encrypt)
}

/// Decrypt `data` with AES under `transformation`; IV rules as for [`encipher_aes`]
pub fn decipher_aes(
    transformation: &str,
    key: &SecretKey,
    iv: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>> {
    run_aes(transformation, key, iv, data, Direction::Decrypt)
}

/// AES-CMAC of `data`, truncated to `output_length` bytes (default 8)
pub fn cmac(data: &[u8], key: &SecretKey, output_length: Option<usize>) -> Result<Vec<u8>> {
    let length = output_length.unwrap_or(CMAC_DEFAULT_LENGTH);
    validate::length_range("CMAC output", length, CMAC_MIN_LENGTH, CMAC_MAX_LENGTH)?;
    check_aes_key(key)?;

    let mut tag = Cmac::mac(Aes::new(key.as_bytes())?, data)?;
    tag.truncate(length);
    Ok(tag)
}

/// AES-CMAC over `iv || data`
///
/// Secure messaging authenticates the send sequence counter this way.
pub fn cmac_with_iv(
    data: &[u8],
    key: &SecretKey,
    iv: &[u8],
    output_length: Option<usize>,
) -> Result<Vec<u8>> {
    validate::length("CMAC initialization vector", iv.len(), AES_IV_LENGTH)?;
    let mut input = Vec::with_capacity(iv.len() + data.len());
    input.extend_from_slice(iv);
    input.extend_from_slice(data);
    let tag = cmac(&input, key, output_length);
    input.zeroize();
    tag
}
