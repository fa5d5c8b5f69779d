use clout_types::constants::ADDRESS_CHECKSUM_LEN;
use clout_types::primitives::Hash;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the given data.
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice. Transaction signatures and address checksums both
/// commit to this digest.
pub fn double_sha256(data: &[u8]) -> Hash {
    sha256(&sha256(data))
}

/// First four bytes of the double SHA-256 of `data`.
pub fn checksum(data: &[u8]) -> [u8; ADDRESS_CHECKSUM_LEN] {
    let hash = double_sha256(data);
    let mut out = [0u8; ADDRESS_CHECKSUM_LEN];
    out.copy_from_slice(&hash[..ADDRESS_CHECKSUM_LEN]);
    out
}
