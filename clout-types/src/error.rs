use thiserror::Error;

/// All error codes for the Clout identity core.
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried internally. Messages never carry key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloutError {
    // ─── Key Errors ──────────────────────────────────────────────────────────
    #[error("invalid mnemonic phrase")]
    InvalidMnemonic,

    #[error("invalid private key")]
    InvalidKey,

    #[error("derivation failed: {reason}")]
    DerivationFailed { reason: String },

    // ─── Encoding Errors ─────────────────────────────────────────────────────
    #[error("invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("invalid hex: {reason}")]
    InvalidHex { reason: String },

    // ─── Signing Errors ──────────────────────────────────────────────────────
    #[error("{operation} requires a signature; use a seed or remote identity")]
    NotAuthenticated { operation: String },

    #[error("signing failed: {reason}")]
    SigningFailed { reason: String },

    #[error("unable to decode or verify token: {reason}")]
    TokenValidation { reason: String },
}

impl CloutError {
    /// Shorthand for a [`CloutError::SigningFailed`] with the given reason.
    pub fn signing(reason: impl Into<String>) -> Self {
        CloutError::SigningFailed {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`CloutError::TokenValidation`] with the given reason.
    pub fn token(reason: impl Into<String>) -> Self {
        CloutError::TokenValidation {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`CloutError::InvalidAddress`] with the given reason.
    pub fn address(reason: impl Into<String>) -> Self {
        CloutError::InvalidAddress {
            reason: reason.into(),
        }
    }
}
