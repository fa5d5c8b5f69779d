//! Per-identity table of requests waiting on a remote-signer response.
//!
//! Each entry is a single-use completion handle. An entry is removed the
//! moment a response is delivered to it, and again (if still present) when
//! its [`PendingResponse`] is dropped, so timeouts, transport failures, and
//! cancelled futures never leave stale entries behind.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use clout_types::error::CloutError;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::protocol::{RemoteResponse, ResponsePayload};

struct Entry {
    seq: u64,
    sender: oneshot::Sender<ResponsePayload>,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    waiting: HashMap<String, Entry>,
    /// Ids whose wait may also be completed by an id-less response, oldest first.
    anonymous: VecDeque<String>,
}

#[derive(Default)]
pub struct PendingRequests {
    inner: Mutex<Inner>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a wait for the response to request `id`.
    ///
    /// With `accept_anonymous`, a response carrying no id may also complete
    /// this wait. Fails if `id` is already waiting.
    pub fn register(
        self: &Arc<Self>,
        id: &str,
        accept_anonymous: bool,
    ) -> Result<PendingResponse, CloutError> {
        let (sender, receiver) = oneshot::channel();
        let mut inner = self.lock();
        if inner.waiting.contains_key(id) {
            return Err(CloutError::signing(format!(
                "request {id} is already waiting for a response"
            )));
        }
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.waiting.insert(id.to_string(), Entry { seq, sender });
        if accept_anonymous {
            inner.anonymous.push_back(id.to_string());
        }
        Ok(PendingResponse {
            id: id.to_string(),
            seq,
            registry: Arc::clone(self),
            receiver,
        })
    }

    /// Hand a response to the request waiting for it.
    ///
    /// Returns `false` when nothing was waiting; the response is dropped.
    pub fn deliver(&self, response: RemoteResponse) -> bool {
        let mut inner = self.lock();
        let entry = match &response.id {
            Some(id) => {
                inner.anonymous.retain(|queued| queued != id);
                inner.waiting.remove(id).map(|entry| (id.clone(), entry))
            }
            None => loop {
                let Some(id) = inner.anonymous.pop_front() else {
                    break None;
                };
                if let Some(entry) = inner.waiting.remove(&id) {
                    break Some((id, entry));
                }
            },
        };
        drop(inner);

        match entry {
            Some((id, entry)) => {
                let delivered = entry.sender.send(response.payload).is_ok();
                debug!(%id, delivered, "remote response delivered");
                delivered
            }
            None => {
                warn!(id = ?response.id, "dropping remote response with no waiting request");
                false
            }
        }
    }

    /// Number of requests still waiting.
    pub fn len(&self) -> usize {
        self.lock().waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&self, id: &str, seq: u64) {
        let mut inner = self.lock();
        // Only remove our own entry: the id may have been re-registered.
        if inner.waiting.get(id).is_some_and(|entry| entry.seq == seq) {
            inner.waiting.remove(id);
            inner.anonymous.retain(|queued| queued != id);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The table stays consistent across a panic, so a poisoned lock is usable.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Handle to one outstanding wait. Dropping it withdraws the wait.
pub struct PendingResponse {
    id: String,
    seq: u64,
    registry: Arc<PendingRequests>,
    receiver: oneshot::Receiver<ResponsePayload>,
}

impl PendingResponse {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Wait for the response. Unbounded; wrap in a timeout.
    pub async fn recv(&mut self) -> Result<ResponsePayload, CloutError> {
        (&mut self.receiver)
            .await
            .map_err(|_| CloutError::signing("remote signer response channel closed"))
    }
}

impl Drop for PendingResponse {
    fn drop(&mut self) {
        self.registry.remove(&self.id, self.seq);
    }
}
