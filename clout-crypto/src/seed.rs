use bip39::Mnemonic;
use clout_types::constants::{MNEMONIC_WORD_COUNT, SEED_LEN};
use clout_types::error::CloutError;
use zeroize::Zeroizing;

/// Generate a new 12-word BIP-39 mnemonic.
pub fn generate_mnemonic() -> Mnemonic {
    // 12 words = 128 bits of entropy = 16 bytes
    let mut entropy = Zeroizing::new([0u8; 16]);
    rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut entropy[..]);
    Mnemonic::from_entropy(&entropy[..]).expect("16 bytes is valid entropy for 12 words")
}

/// Parse a mnemonic from a string of space-separated words.
///
/// Only 12-word English phrases with a valid checksum are accepted.
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic, CloutError> {
    let mnemonic = Mnemonic::parse_normalized(phrase).map_err(|_| CloutError::InvalidMnemonic)?;
    if mnemonic.word_count() != MNEMONIC_WORD_COUNT {
        return Err(CloutError::InvalidMnemonic);
    }
    Ok(mnemonic)
}

/// Derive the 64-byte BIP-39 seed from a mnemonic. No passphrase is used.
pub fn mnemonic_to_seed(mnemonic: &Mnemonic) -> Zeroizing<[u8; SEED_LEN]> {
    Zeroizing::new(mnemonic.to_seed(""))
}

/// Parse `phrase` and derive its seed in one step.
pub fn derive_seed(phrase: &str) -> Result<Zeroizing<[u8; SEED_LEN]>, CloutError> {
    let mnemonic = parse_mnemonic(phrase)?;
    Ok(mnemonic_to_seed(&mnemonic))
}
