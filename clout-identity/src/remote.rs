//! Identity whose key lives with an external signer.
//!
//! Requests go out through a [`RemoteTransport`]; responses come back through
//! a [`ResponseSink`] and are matched to the waiting request by correlation
//! id. Both waits of the exchange are bounded by [`RemoteSignerConfig`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clout_crypto::token::Claims;
use clout_types::error::CloutError;
use clout_types::primitives::Address;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::RemoteSignerConfig;
use crate::protocol::{RemoteRequest, RemoteResponse, ResponsePayload};
use crate::registry::{PendingRequests, PendingResponse};

/// Outbound side of the link to an external signer.
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    /// Deliver a request to the signer.
    async fn send(&self, request: RemoteRequest) -> Result<(), CloutError>;

    /// Open the out-of-band channel where the user approves `transaction_hex`.
    async fn open_approval(&self, transaction_hex: &str) -> Result<(), CloutError>;
}

/// Messages emitted by a [`ChannelTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum TransportMessage {
    Request(RemoteRequest),
    OpenApproval { transaction_hex: String },
}

/// Transport that forwards everything onto a tokio channel.
///
/// The host owns the receiving half and bridges it to the real signer
/// (a window, a socket, a test double).
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    outbound: mpsc::Sender<TransportMessage>,
}

impl ChannelTransport {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<TransportMessage>) {
        let (outbound, rx) = mpsc::channel(capacity);
        (Self { outbound }, rx)
    }

    async fn forward(&self, message: TransportMessage) -> Result<(), CloutError> {
        self.outbound
            .send(message)
            .await
            .map_err(|_| CloutError::signing("remote signer transport closed"))
    }
}

#[async_trait]
impl RemoteTransport for ChannelTransport {
    async fn send(&self, request: RemoteRequest) -> Result<(), CloutError> {
        self.forward(TransportMessage::Request(request)).await
    }

    async fn open_approval(&self, transaction_hex: &str) -> Result<(), CloutError> {
        self.forward(TransportMessage::OpenApproval {
            transaction_hex: transaction_hex.to_string(),
        })
        .await
    }
}

/// Inbound side: hands signer responses to the identity that is waiting.
#[derive(Clone)]
pub struct ResponseSink {
    pending: Arc<PendingRequests>,
}

impl ResponseSink {
    /// Returns `false` if no request was waiting for this response.
    pub fn deliver(&self, response: RemoteResponse) -> bool {
        self.pending.deliver(response)
    }

    /// Parse a JSON response message and deliver it.
    pub fn deliver_json(&self, message: &str) -> Result<bool, CloutError> {
        let response: RemoteResponse = serde_json::from_str(message)
            .map_err(|e| CloutError::signing(format!("malformed remote response: {e}")))?;
        Ok(self.deliver(response))
    }
}

/// An identity that signs by asking an external signer.
pub struct RemoteIdentity {
    address: Address,
    transport: Arc<dyn RemoteTransport>,
    pending: Arc<PendingRequests>,
    config: RemoteSignerConfig,
}

impl RemoteIdentity {
    pub fn new(
        address: Address,
        transport: Arc<dyn RemoteTransport>,
        config: RemoteSignerConfig,
    ) -> Self {
        Self {
            address,
            transport,
            pending: Arc::new(PendingRequests::new()),
            config,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn config(&self) -> &RemoteSignerConfig {
        &self.config
    }

    /// Handle for feeding signer responses back to this identity.
    pub fn responses(&self) -> ResponseSink {
        ResponseSink {
            pending: Arc::clone(&self.pending),
        }
    }

    /// Number of requests currently awaiting a response.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Ask the signer to sign `unsigned_hex`.
    ///
    /// If the signer answers with `approvalRequired`, the approval channel is
    /// opened and the final signed hex is awaited under the same id.
    pub async fn sign_transaction(&self, unsigned_hex: &str) -> Result<String, CloutError> {
        let id = Uuid::new_v4().to_string();
        let mut pending = self.pending.register(&id, false)?;
        self.transport
            .send(RemoteRequest::sign(&id, unsigned_hex))
            .await?;
        debug!(%id, method = "sign", "remote request sent");

        let payload = wait(&mut pending, self.config.response_timeout).await?;
        let approval_required = payload.approval_required();
        if let Some(signed) = payload.signed_transaction_hex {
            return Ok(signed);
        }
        if !approval_required {
            return Err(CloutError::signing(
                "remote signer returned neither a signed transaction nor an approval request",
            ));
        }
        drop(pending);

        let mut approval = self.pending.register(&id, true)?;
        self.transport.open_approval(unsigned_hex).await?;
        debug!(%id, "remote approval requested");

        let payload = wait(&mut approval, self.config.approval_timeout).await?;
        payload
            .signed_transaction_hex
            .ok_or_else(|| CloutError::signing("approval finished without a signed transaction"))
    }

    /// Ask the signer to issue a token over `claims`.
    pub async fn issue_token(&self, claims: &Claims) -> Result<String, CloutError> {
        let id = Uuid::new_v4().to_string();
        let mut pending = self.pending.register(&id, false)?;
        self.transport
            .send(RemoteRequest::jwt(&id, claims.clone()))
            .await?;
        debug!(%id, method = "jwt", "remote request sent");

        let payload = wait(&mut pending, self.config.response_timeout).await?;
        payload
            .jwt
            .ok_or_else(|| CloutError::signing("remote signer returned no token"))
    }
}

impl std::fmt::Debug for RemoteIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteIdentity")
            .field("address", &self.address)
            .field("pending", &self.pending.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

async fn wait(
    pending: &mut PendingResponse,
    limit: Duration,
) -> Result<ResponsePayload, CloutError> {
    match tokio::time::timeout(limit, pending.recv()).await {
        Ok(result) => result,
        Err(_) => {
            warn!(id = %pending.id(), timeout_secs = limit.as_secs(), "remote signer timed out");
            Err(CloutError::signing(format!(
                "remote signer did not respond within {}s",
                limit.as_secs()
            )))
        }
    }
}
