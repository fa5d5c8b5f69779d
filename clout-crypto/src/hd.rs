use std::str::FromStr;

use bip32::{DerivationPath, XPrv};
use clout_types::constants::{DERIVATION_PATH, PRIVATE_KEY_LEN, SEED_LEN};
use clout_types::error::CloutError;
use zeroize::Zeroizing;

use crate::keys::Keypair;
use crate::seed::derive_seed;

/// Private key and chain code at the account path.
///
/// Both halves are wiped on drop.
pub struct HdKeychain {
    private_key: Zeroizing<[u8; PRIVATE_KEY_LEN]>,
    chain_code: Zeroizing<[u8; 32]>,
}

impl HdKeychain {
    /// The raw private scalar.
    pub fn private_key(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.private_key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Build the secp256k1 keypair for this node.
    pub fn keypair(&self) -> Result<Keypair, CloutError> {
        Keypair::from_private_key_bytes(&self.private_key[..])
    }
}

/// Derive the BIP-32 keychain at `m/44'/0'/0'/0/0` from a BIP-39 seed.
///
/// The path is fixed: one account per seed.
pub fn derive_keychain(seed: &[u8; SEED_LEN]) -> Result<HdKeychain, CloutError> {
    let path = DerivationPath::from_str(DERIVATION_PATH).map_err(|e| {
        CloutError::DerivationFailed {
            reason: format!("invalid path '{}': {}", DERIVATION_PATH, e),
        }
    })?;

    // XPrv zeroizes its key material when it goes out of scope.
    let xprv = XPrv::derive_from_path(seed, &path).map_err(|e| CloutError::DerivationFailed {
        reason: e.to_string(),
    })?;

    let mut private_key = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
    private_key.copy_from_slice(&xprv.private_key().to_bytes());
    Ok(HdKeychain {
        private_key,
        chain_code: Zeroizing::new(xprv.attrs().chain_code),
    })
}

/// Derive the account keypair from a BIP-39 seed.
pub fn derive_keypair(seed: &[u8; SEED_LEN]) -> Result<Keypair, CloutError> {
    derive_keychain(seed)?.keypair()
}

/// Full phrase-to-keypair derivation: parse, seed, walk the path.
pub fn keypair_from_mnemonic(phrase: &str) -> Result<Keypair, CloutError> {
    let seed = derive_seed(phrase)?;
    derive_keypair(&seed)
}
