//! Error type definitions

use thiserror::Error as ThisError;

/// Primary error type for every operation of the core
///
/// The variants mirror the failure classes callers are expected to react
/// to differently: malformed input, unusable domain parameters, key
/// lifecycle conflicts, lifecycle misuse and opaque backend faults.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Malformed input: wrong key algorithm or size, out-of-range MAC
    /// length, non-prime-field curve, non-positive scalar, wrong config
    /// variant for a backend
    #[error("invalid argument in {context}: {message}")]
    InvalidArgument {
        context: &'static str,
        message: String,
    },

    /// The structure does not embed domain parameters; look them up by
    /// curve ID instead
    #[error("domain parameters missing in {context}")]
    MissingDomainParameters { context: &'static str },

    /// Curve ID outside the standardized table
    #[error("unknown standardized curve id {id}")]
    UnknownCurveId { id: i64 },

    /// A key is already stored under the alias and replacement was not requested
    #[error("a key already exists under alias '{alias}'")]
    AliasExists { alias: String },

    /// No key is stored under the alias
    #[error("no key found under alias '{alias}'")]
    KeyNotFound { alias: String },

    /// Operation attempted outside the state that permits it
    #[error("illegal state in {context}: {message}")]
    IllegalState {
        context: &'static str,
        message: String,
    },

    /// Opaque wrapper around any backend-specific failure
    #[error("HSM failure in {context}: {message}")]
    HsmError {
        context: &'static str,
        message: String,
    },
}

/// Result type for all eidcrypt operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand for an `InvalidArgument` error
    pub fn invalid_argument(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for an `IllegalState` error
    pub fn illegal_state(context: &'static str, message: impl Into<String>) -> Self {
        Self::IllegalState {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for an `HsmError`
    pub fn hsm(context: &'static str, message: impl Into<String>) -> Self {
        Self::HsmError {
            context,
            message: message.into(),
        }
    }

    /// Replace the context of an existing error, keeping its message
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidArgument { message, .. } => Self::InvalidArgument { context, message },
            Self::MissingDomainParameters { .. } => Self::MissingDomainParameters { context },
            Self::IllegalState { message, .. } => Self::IllegalState { context, message },
            Self::HsmError { message, .. } => Self::HsmError { context, message },
            other => other,
        }
    }

    /// Replace the message of an existing error where the variant carries one
    pub fn with_message(self, message: impl Into<String>) -> Self {
        match self {
            Self::InvalidArgument { context, .. } => Self::InvalidArgument {
                context,
                message: message.into(),
            },
            Self::IllegalState { context, .. } => Self::IllegalState {
                context,
                message: message.into(),
            },
            Self::HsmError { context, .. } => Self::HsmError {
                context,
                message: message.into(),
            },
            other => other,
        }
    }

    /// True for errors raised by a key store lookup that found nothing
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }
}
