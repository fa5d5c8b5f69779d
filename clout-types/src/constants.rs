use std::time::Duration;

// ─── Key Derivation ──────────────────────────────────────────────────────────

/// BIP-44 path every account key is derived at. One account per seed.
pub const DERIVATION_PATH: &str = "m/44'/0'/0'/0/0";

/// Number of words accepted in a seed phrase.
pub const MNEMONIC_WORD_COUNT: usize = 12;

/// Length of the BIP-39 seed in bytes.
pub const SEED_LEN: usize = 64;

/// Length of a secp256k1 private scalar in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Length of a SEC1 compressed secp256k1 point in bytes.
pub const COMPRESSED_PUBKEY_LEN: usize = 33;

// ─── Address Encoding ────────────────────────────────────────────────────────

/// Network prefix for mainnet addresses (renders as `BC1YL...`).
pub const MAINNET_PREFIX: [u8; 3] = [0xcd, 0x14, 0x00];

/// Network prefix for testnet addresses (renders as `tBC...`).
pub const TESTNET_PREFIX: [u8; 3] = [0x11, 0xc2, 0x00];

/// Length of the network prefix in bytes.
pub const ADDRESS_PREFIX_LEN: usize = 3;

/// Length of the base58check checksum in bytes.
pub const ADDRESS_CHECKSUM_LEN: usize = 4;

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// Lifetime of an issued token (seconds).
pub const TOKEN_TTL_SECS: u64 = 60;

/// JWS algorithm label written into token headers.
///
/// ES256 names P-256, but tokens are signed with the secp256k1 account key.
/// Existing verifiers expect this exact label, so it stays.
pub const TOKEN_ALGORITHM: &str = "ES256";

/// JWS type label written into token headers.
pub const TOKEN_TYPE: &str = "JWT";

// ─── Remote Signer ───────────────────────────────────────────────────────────

/// Service name stamped on every remote-signer request.
pub const REMOTE_SIGNER_SERVICE: &str = "identity";

/// Default wait for the first remote-signer response.
pub const DEFAULT_REMOTE_RESPONSE_TIMEOUT: Duration = Duration::from_secs(60);

/// Default wait for a user to finish an out-of-band approval.
pub const DEFAULT_REMOTE_APPROVAL_TIMEOUT: Duration = Duration::from_secs(300);
