//! Messages exchanged with an external signer.
//!
//! Requests are `{id, service, method, payload}`; responses are
//! `{id?, payload: {signedTransactionHex?, jwt?, approvalRequired?}}`.
//! A response without an id can only complete an approval wait.

use clout_crypto::token::Claims;
use clout_types::constants::REMOTE_SIGNER_SERVICE;
use serde::{Deserialize, Serialize};

/// What the remote signer is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteMethod {
    /// Sign an unsigned transaction.
    Sign,
    /// Issue a token.
    Jwt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRequest {
    /// Correlation id echoed back in the response.
    pub id: String,
    pub service: String,
    pub method: RemoteMethod,
    pub payload: RequestPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hex: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub claims: Claims,
}

impl RemoteRequest {
    /// A `sign` request for the given unsigned transaction.
    pub fn sign(id: impl Into<String>, transaction_hex: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            service: REMOTE_SIGNER_SERVICE.to_string(),
            method: RemoteMethod::Sign,
            payload: RequestPayload {
                transaction_hex: Some(transaction_hex.into()),
                claims: Claims::new(),
            },
        }
    }

    /// A `jwt` request carrying the claims to sign.
    pub fn jwt(id: impl Into<String>, claims: Claims) -> Self {
        Self {
            id: id.into(),
            service: REMOTE_SIGNER_SERVICE.to_string(),
            method: RemoteMethod::Jwt,
            payload: RequestPayload {
                transaction_hex: None,
                claims,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_transaction_hex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_required: Option<bool>,
}

impl ResponsePayload {
    pub fn approval_required(&self) -> bool {
        self.approval_required.unwrap_or(false)
    }
}

impl RemoteResponse {
    /// A correlated response carrying a signed transaction.
    pub fn signed(id: impl Into<String>, signed_hex: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            payload: ResponsePayload {
                signed_transaction_hex: Some(signed_hex.into()),
                ..Default::default()
            },
        }
    }

    /// A correlated response asking for out-of-band approval.
    pub fn needs_approval(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            payload: ResponsePayload {
                approval_required: Some(true),
                ..Default::default()
            },
        }
    }

    /// A correlated response carrying a token.
    pub fn token(id: impl Into<String>, jwt: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            payload: ResponsePayload {
                jwt: Some(jwt.into()),
                ..Default::default()
            },
        }
    }
}
