use clout_types::error::CloutError;
use thiserror::Error;

/// Errors that can occur in the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error(transparent)]
    Clout(#[from] CloutError),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CliError {
    /// A short suggestion to print under the error, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::ConfigError { .. } => Some("run `clout init` to write a default clout.toml"),
            CliError::Clout(CloutError::InvalidMnemonic) => {
                Some("the phrase must be 12 English BIP-39 words separated by spaces")
            }
            CliError::Clout(CloutError::NotAuthenticated { .. }) => {
                Some("pass --mnemonic (or set CLOUT_MNEMONIC) or --remote <ADDRESS>")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::ConfigError {
            reason: "missing field".to_string(),
        };
        assert!(err.to_string().contains("missing field"));
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_clout_error_is_transparent() {
        let err: CliError = CloutError::token("token expired").into();
        assert_eq!(
            err.to_string(),
            "unable to decode or verify token: token expired"
        );
        assert!(err.hint().is_none());
    }

    #[test]
    fn test_invalid_mnemonic_has_hint() {
        let err: CliError = CloutError::InvalidMnemonic.into();
        assert!(err.hint().unwrap().contains("12"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::IoError(_)));
    }
}
