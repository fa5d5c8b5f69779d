use std::fmt;

use clout_types::constants::{COMPRESSED_PUBKEY_LEN, PRIVATE_KEY_LEN};
use clout_types::error::CloutError;
use clout_types::primitives::PublicKeyBytes;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};

/// Wrapper around a secp256k1 keypair.
pub struct Keypair {
    inner: SigningKey,
}

// SigningKey is ZeroizeOnDrop, so the scalar is wiped when Keypair is dropped.

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::rngs::OsRng);
        Self { inner: signing_key }
    }

    /// Create a keypair from raw 32-byte private scalar bytes.
    ///
    /// Fails with [`CloutError::InvalidKey`] for any other length, for zero,
    /// and for scalars not below the curve order.
    pub fn from_private_key_bytes(bytes: &[u8]) -> Result<Self, CloutError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(CloutError::InvalidKey);
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| CloutError::InvalidKey)?;
        Ok(Self { inner: signing_key })
    }

    /// Get the SEC1 compressed public key bytes.
    pub fn public_key(&self) -> PublicKeyBytes {
        compress(self.inner.verifying_key())
    }

    /// Get the public half as a verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        self.inner.verifying_key()
    }

    /// Get a reference to the underlying signing key.
    pub fn signing_key(&self) -> &SigningKey {
        &self.inner
    }

    /// ECDSA-sign a 32-byte digest, returning a low-S signature.
    ///
    /// The digest is signed as-is; callers hash first.
    pub fn sign_prehash(&self, digest: &[u8; 32]) -> Result<Signature, CloutError> {
        PrehashSigner::<Signature>::sign_prehash(&self.inner, digest)
            .map_err(|e| CloutError::signing(e.to_string()))
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &hex::encode(self.public_key()))
            .finish_non_exhaustive()
    }
}

/// Serialize a verifying key as a SEC1 compressed point.
pub fn compress(key: &VerifyingKey) -> PublicKeyBytes {
    let point = key.to_encoded_point(true);
    let mut out = [0u8; COMPRESSED_PUBKEY_LEN];
    out.copy_from_slice(point.as_bytes());
    out
}

/// Parse a SEC1 compressed point into a verifying key.
pub fn verifying_key_from_bytes(bytes: &[u8]) -> Result<VerifyingKey, CloutError> {
    if bytes.len() != COMPRESSED_PUBKEY_LEN {
        return Err(CloutError::address(format!(
            "public key must be {} bytes, got {}",
            COMPRESSED_PUBKEY_LEN,
            bytes.len()
        )));
    }
    VerifyingKey::from_sec1_bytes(bytes)
        .map_err(|_| CloutError::address("bytes are not a point on secp256k1"))
}

/// Verify an ECDSA signature over a 32-byte digest.
///
/// High-S signatures are normalised first so that signatures produced by
/// non-normalising signers still verify.
pub fn verify_prehash(
    digest: &[u8; 32],
    signature: &Signature,
    key: &VerifyingKey,
) -> Result<(), CloutError> {
    let signature = signature.normalize_s().unwrap_or(*signature);
    key.verify_prehash(digest, &signature)
        .map_err(|_| CloutError::signing("signature does not verify"))
}
