//! Short-lived JWTs bound to an account key.
//!
//! Tokens carry the header `{"alg":"ES256","typ":"JWT"}` but are signed with
//! the account's secp256k1 key, not a P-256 key. That pairing is what the
//! node's verifiers expect and must not be "fixed" here.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use clout_types::constants::{TOKEN_ALGORITHM, TOKEN_TTL_SECS, TOKEN_TYPE};
use clout_types::error::CloutError;
use clout_types::primitives::Timestamp;
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use k256::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use k256::SecretKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use zeroize::Zeroizing;

use crate::address::decode_address;
use crate::keys::Keypair;

/// Token claims: an arbitrary JSON object.
pub type Claims = serde_json::Map<String, Value>;

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

impl Header {
    fn standard() -> Self {
        Self {
            alg: TOKEN_ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

/// Issue a token over `claims`, valid for 60 seconds from now.
pub fn issue_token(keypair: &Keypair, claims: &Claims) -> Result<String, CloutError> {
    issue_token_at(keypair, claims, unix_now())
}

/// Issue a token as if the current time were `issued_at`.
///
/// `iat` and `exp` are set by the issuer and override any caller values.
pub fn issue_token_at(
    keypair: &Keypair,
    claims: &Claims,
    issued_at: Timestamp,
) -> Result<String, CloutError> {
    let mut claims = claims.clone();
    claims.insert("iat".to_string(), Value::from(issued_at));
    claims.insert("exp".to_string(), Value::from(issued_at.saturating_add(TOKEN_TTL_SECS)));

    let header = encode_segment(&Header::standard())?;
    let payload = encode_segment(&claims)?;
    let signing_input = format!("{header}.{payload}");

    let pem = encode_private_pem(keypair)?;
    let signing_key = signing_key_from_pem(&pem)?;
    let signature: Signature = Signer::<Signature>::try_sign(&signing_key, signing_input.as_bytes())
        .map_err(|e| CloutError::signing(e.to_string()))?;

    debug!(iat = issued_at, "issued token");
    Ok(format!(
        "{signing_input}.{}",
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    ))
}

/// Verify a token against the account at `address`, returning its claims.
pub fn verify_token(token: &str, address: &str) -> Result<Claims, CloutError> {
    verify_token_at(token, address, unix_now())
}

/// Verify a token as if the current time were `now`.
pub fn verify_token_at(token: &str, address: &str, now: Timestamp) -> Result<Claims, CloutError> {
    let mut parts = token.split('.');
    let (Some(header_b64), Some(claims_b64), Some(sig_b64), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(CloutError::token("expected three dot-separated segments"));
    };

    let header: Header = decode_segment(header_b64)?;
    if header.alg != TOKEN_ALGORITHM {
        return Err(CloutError::token(format!(
            "unsupported algorithm '{}'",
            header.alg
        )));
    }

    let point = decode_address(address).map_err(|e| CloutError::token(e.to_string()))?;
    let pem = encode_public_pem(&point)?;
    let verifying_key = VerifyingKey::from_public_key_pem(&pem)
        .map_err(|_| CloutError::token("public key did not survive PEM encoding"))?;

    let sig_bytes = URL_SAFE_NO_PAD
        .decode(sig_b64)
        .map_err(|e| CloutError::token(format!("signature is not base64url: {}", e)))?;
    let signature = Signature::from_slice(&sig_bytes)
        .map_err(|_| CloutError::token("signature is not a 64-byte r||s pair"))?;
    let signature = signature.normalize_s().unwrap_or(signature);

    let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];
    verifying_key
        .verify(signing_input.as_bytes(), &signature)
        .map_err(|_| CloutError::token("invalid signature"))?;

    let claims: Claims = decode_segment(claims_b64)?;
    let exp = claims
        .get("exp")
        .and_then(Value::as_u64)
        .ok_or_else(|| CloutError::token("missing exp claim"))?;
    if now >= exp {
        return Err(CloutError::token("token expired"));
    }

    Ok(claims)
}

/// SEC1 PEM for the account's private scalar. Wiped on drop.
fn encode_private_pem(keypair: &Keypair) -> Result<Zeroizing<String>, CloutError> {
    let secret = SecretKey::from(keypair.signing_key());
    secret
        .to_sec1_pem(LineEnding::LF)
        .map_err(|_| CloutError::signing("failed to encode private key"))
}

fn signing_key_from_pem(pem: &str) -> Result<SigningKey, CloutError> {
    let secret = SecretKey::from_sec1_pem(pem).map_err(|_| CloutError::InvalidKey)?;
    Ok(SigningKey::from(secret))
}

/// SPKI PEM for a public point.
fn encode_public_pem(key: &VerifyingKey) -> Result<String, CloutError> {
    key.to_public_key_pem(LineEnding::LF)
        .map_err(|e| CloutError::token(format!("failed to encode public key: {}", e)))
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, CloutError> {
    let json = serde_json::to_vec(value).map_err(|e| CloutError::signing(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T, CloutError> {
    let json = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| CloutError::token(format!("segment is not base64url: {}", e)))?;
    serde_json::from_slice(&json).map_err(|e| CloutError::token(format!("bad segment: {}", e)))
}

fn unix_now() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
