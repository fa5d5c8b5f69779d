use dialoguer::Password;
use zeroize::Zeroizing;

use crate::error::CliError;

/// Prompt for a seed phrase without echoing it.
pub fn prompt_mnemonic() -> Result<Zeroizing<String>, CliError> {
    Password::new()
        .with_prompt("Enter mnemonic phrase")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| CliError::IoError(std::io::Error::other(e)))
}
