//! Error handling for the primitive layer
//!
//! Primitives report failures with this crate-local [`Error`]. It converts
//! losslessly into the workspace-wide [`eidcrypt_api::Error`] so the HSM
//! layer and applications only ever see the public taxonomy.

use std::borrow::Cow;
use std::fmt;

use eidcrypt_api::Error as CoreError;

/// The error type for primitive operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Parameter validation error
    Parameter {
        /// Name of the invalid parameter
        name: Cow<'static, str>,
        /// Reason why the parameter is invalid
        reason: Cow<'static, str>,
    },

    /// Length validation error
    Length {
        /// Context where the length error occurred
        context: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Requested algorithm, mode or encoding is not supported
    NotSupported {
        /// Name of the unsupported feature
        feature: Cow<'static, str>,
    },

    /// Malformed ASN.1 / TLV input
    Encoding {
        /// Structure being decoded
        context: &'static str,
        /// What was wrong with it
        details: Cow<'static, str>,
    },

    /// The structure carries no explicit domain parameters
    MissingDomainParameters {
        /// Structure that was inspected
        context: &'static str,
    },

    /// Standardized curve ID outside the known table
    UnknownCurveId {
        /// The rejected ID
        id: i64,
    },

    /// Processing error during a cryptographic operation
    Processing {
        /// Operation that failed
        operation: &'static str,
        /// Additional details about the failure
        details: &'static str,
    },
}

impl Error {
    /// Shorthand to create a Parameter error
    pub fn param<N: Into<Cow<'static, str>>, R: Into<Cow<'static, str>>>(
        name: N,
        reason: R,
    ) -> Self {
        Error::Parameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand to create an Encoding error
    pub fn encoding<D: Into<Cow<'static, str>>>(context: &'static str, details: D) -> Self {
        Error::Encoding {
            context,
            details: details.into(),
        }
    }

    /// Shorthand to create a NotSupported error
    pub fn not_supported<F: Into<Cow<'static, str>>>(feature: F) -> Self {
        Error::NotSupported {
            feature: feature.into(),
        }
    }
}

/// Result type for primitive operations
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            Error::Length {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid length for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Error::NotSupported { feature } => write!(f, "Not supported: {}", feature),
            Error::Encoding { context, details } => {
                write!(f, "Malformed encoding of {}: {}", context, details)
            }
            Error::MissingDomainParameters { context } => {
                write!(f, "No domain parameters in {}", context)
            }
            Error::UnknownCurveId { id } => write!(f, "Unknown standardized curve id {}", id),
            Error::Processing { operation, details } => {
                write!(f, "Processing error in {}: {}", operation, details)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::MissingDomainParameters { context } => {
                CoreError::MissingDomainParameters { context }
            }
            Error::UnknownCurveId { id } => CoreError::UnknownCurveId { id },
            Error::Parameter { .. } => CoreError::invalid_argument("parameter", err.to_string()),
            Error::Length { context, .. } => CoreError::invalid_argument(context, err.to_string()),
            Error::NotSupported { .. } => {
                CoreError::invalid_argument("unsupported", err.to_string())
            }
            Error::Encoding { context, .. } => {
                CoreError::invalid_argument(context, err.to_string())
            }
            Error::Processing { operation, .. } => {
                CoreError::invalid_argument(operation, err.to_string())
            }
        }
    }
}

// Include the validation submodule
pub mod validate;
