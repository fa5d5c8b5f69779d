//! Transaction signing.
//!
//! Unsigned transactions arrive from the node with a single trailing byte
//! standing in for the (empty) signature-length field. Signing hashes the
//! whole unsigned buffer, drops that byte, and appends
//! `uvarint(len(der)) ∥ der`.

use clout_types::error::CloutError;
use k256::ecdsa::{Signature, VerifyingKey};
use tracing::debug;

use crate::hash::double_sha256;
use crate::keys::{verify_prehash, Keypair};
use crate::varint::{decode_uvarint, encode_uvarint};

/// Sign a hex-encoded unsigned transaction, returning the signed hex.
pub fn sign_transaction(unsigned_hex: &str, keypair: &Keypair) -> Result<String, CloutError> {
    let unsigned = decode_hex(unsigned_hex)?;
    let signed = sign_transaction_bytes(&unsigned, keypair)?;
    Ok(hex::encode(signed))
}

/// Sign raw unsigned transaction bytes, returning the signed bytes.
pub fn sign_transaction_bytes(unsigned: &[u8], keypair: &Keypair) -> Result<Vec<u8>, CloutError> {
    let Some((_placeholder, body)) = unsigned.split_last() else {
        return Err(CloutError::signing("transaction is empty"));
    };

    let digest = double_sha256(unsigned);
    let signature = keypair.sign_prehash(&digest)?;
    let der = signature.to_der();
    let der = der.as_bytes();
    let len_prefix = encode_uvarint(der.len() as u64);

    let mut signed = Vec::with_capacity(body.len() + len_prefix.len() + der.len());
    signed.extend_from_slice(body);
    signed.extend_from_slice(&len_prefix);
    signed.extend_from_slice(der);

    debug!(
        unsigned_len = unsigned.len(),
        signature_len = der.len(),
        signed_len = signed.len(),
        "signed transaction"
    );
    Ok(signed)
}

/// Check a signed transaction against the unsigned form it was made from.
///
/// The signed bytes must be the unsigned bytes minus the placeholder,
/// followed by a varint length and exactly that many bytes of DER signature
/// over the double SHA-256 of the full unsigned buffer.
pub fn verify_signed_transaction(
    unsigned_hex: &str,
    signed_hex: &str,
    key: &VerifyingKey,
) -> Result<(), CloutError> {
    let unsigned = decode_hex(unsigned_hex)?;
    let signed = decode_hex(signed_hex)?;
    let signature = extract_signature(&unsigned, &signed)?;
    verify_prehash(&double_sha256(&unsigned), &signature, key)
}

/// Pull the DER signature out of `signed`, checking it extends `unsigned`.
pub fn extract_signature(unsigned: &[u8], signed: &[u8]) -> Result<Signature, CloutError> {
    let Some((_, body)) = unsigned.split_last() else {
        return Err(CloutError::signing("transaction is empty"));
    };
    let tail = signed
        .strip_prefix(body)
        .ok_or_else(|| CloutError::signing("signed transaction does not extend the unsigned one"))?;

    let (sig_len, consumed) = decode_uvarint(tail)?;
    let der = &tail[consumed..];
    if der.len() as u64 != sig_len {
        return Err(CloutError::signing(format!(
            "signature length prefix says {} bytes, found {}",
            sig_len,
            der.len()
        )));
    }
    Signature::from_der(der).map_err(|_| CloutError::signing("malformed DER signature"))
}

fn decode_hex(input: &str) -> Result<Vec<u8>, CloutError> {
    hex::decode(input.trim()).map_err(|e| CloutError::InvalidHex {
        reason: e.to_string(),
    })
}
