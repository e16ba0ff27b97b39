//! HSM configuration
//!
//! [`HsmConfiguration`] selects the backend. It is a plain value that can be
//! built in code or deserialized from TOML:
//!
//! ```toml
//! type = "pkcs11"
//! config_file_path = "/etc/eidcrypt/pkcs11.cfg"
//! password = "1234"
//! ```
//!
//! The PKCS#11 variant points at a provider file in the usual
//! `key = value` layout, parsed by [`Pkcs11ProviderConfig`].

use core::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eidcrypt_api::{Error, Result};
use serde::{Deserialize, Serialize};

/// Backend selection
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HsmConfiguration {
    /// Software backend keeping keys in process memory
    NoHsm,
    /// Token reached through a PKCS#11 provider library
    Pkcs11 {
        /// Provider configuration file
        config_file_path: PathBuf,
        /// User PIN
        password: String,
    },
}

impl HsmConfiguration {
    /// PKCS#11 configuration from a provider file and the user PIN
    pub fn pkcs11(config_file_path: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self::Pkcs11 {
            config_file_path: config_file_path.into(),
            password: password.into(),
        }
    }

    /// Parse a configuration from TOML
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input)
            .map_err(|e| Error::invalid_argument("HSM configuration", e.to_string()))
    }

    /// Read and parse a TOML configuration file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Short backend name for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoHsm => "no-hsm",
            Self::Pkcs11 { .. } => "pkcs11",
        }
    }
}

impl fmt::Debug for HsmConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHsm => f.write_str("NoHsm"),
            Self::Pkcs11 {
                config_file_path, ..
            } => f
                .debug_struct("Pkcs11")
                .field("config_file_path", config_file_path)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}

/// Contents of a PKCS#11 provider configuration file
///
/// Recognized keys are `library`, `slot`, `slotListIndex`, `name` and
/// `extractableKeys`. Lines
/// starting with `#` are comments; other keys are ignored so files written
/// for other providers keep working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pkcs11ProviderConfig {
    /// Path of the provider shared library
    pub library: PathBuf,
    /// Slot ID to use
    pub slot: Option<u64>,
    /// Index into the list of slots with a token
    pub slot_list_index: Option<usize>,
    /// Provider name used in log messages
    pub name: Option<String>,
    /// Generate private keys that may leave the token, needed for key distribution
    pub extractable_keys: bool,
}

impl Pkcs11ProviderConfig {
    /// Parse the textual provider configuration
    pub fn parse(input: &str) -> Result<Self> {
        let mut library = None;
        let mut slot = None;
        let mut slot_list_index = None;
        let mut name = None;
        let mut extractable_keys = false;

        for (number, raw) in input.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                Error::invalid_argument(
                    "PKCS#11 configuration",
                    format!("line {}: expected 'key = value'", number + 1),
                )
            })?;
            let value = value.trim();
            match key.trim() {
                "library" => library = Some(PathBuf::from(value)),
                "slot" => slot = Some(parse_value("slot", value)?),
                "slotListIndex" => {
                    slot_list_index = Some(parse_value::<usize>("slotListIndex", value)?)
                }
                "name" => name = Some(value.to_string()),
                "extractableKeys" => extractable_keys = parse_value("extractableKeys", value)?,
                _ => {}
            }
        }

        let library = library.ok_or_else(|| {
            Error::invalid_argument("PKCS#11 configuration", "missing 'library' entry")
        })?;
        if slot.is_some() && slot_list_index.is_some() {
            return Err(Error::invalid_argument(
                "PKCS#11 configuration",
                "'slot' and 'slotListIndex' are mutually exclusive",
            ));
        }
        Ok(Self {
            library,
            slot,
            slot_list_index,
            name,
            extractable_keys,
        })
    }

    /// Read and parse a provider configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }
}

fn parse_value<T: core::str::FromStr>(key: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        Error::invalid_argument(
            "PKCS#11 configuration",
            format!("invalid value for '{}': {}", key, value),
        )
    })
}

/// Bounded retry for key distribution to cluster peers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per peer, including the first one
    pub max_attempts: u32,
    /// Pause between two attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Policy with the given attempts and pause
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Single attempt, no pause
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(200))
    }
}

#[cfg(test)]
mod tests;
