//! Remote-signer transport over the process's stdin and stdout.
//!
//! Each request is written to stdout as one JSON line. The signer answers
//! with one JSON response per line on stdin.

use async_trait::async_trait;
use clout_identity::protocol::RemoteRequest;
use clout_identity::{RemoteTransport, ResponseSink};
use clout_types::constants::REMOTE_SIGNER_SERVICE;
use clout_types::error::CloutError;
use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct StdioTransport {
    stdout: Mutex<Stdout>,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            stdout: Mutex::new(tokio::io::stdout()),
        }
    }

    async fn write_line(&self, line: &str) -> Result<(), CloutError> {
        let mut out = self.stdout.lock().await;
        let io_err = |e: std::io::Error| CloutError::signing(format!("failed to write to signer: {e}"));
        out.write_all(line.as_bytes()).await.map_err(io_err)?;
        out.write_all(b"\n").await.map_err(io_err)?;
        out.flush().await.map_err(io_err)
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteTransport for StdioTransport {
    async fn send(&self, request: RemoteRequest) -> Result<(), CloutError> {
        self.write_line(&request_line(&request)?).await
    }

    async fn open_approval(&self, transaction_hex: &str) -> Result<(), CloutError> {
        self.write_line(&approval_line(transaction_hex)).await
    }
}

fn request_line(request: &RemoteRequest) -> Result<String, CloutError> {
    serde_json::to_string(request)
        .map_err(|e| CloutError::signing(format!("failed to encode request: {e}")))
}

fn approval_line(transaction_hex: &str) -> String {
    json!({
        "service": REMOTE_SIGNER_SERVICE,
        "method": "approve",
        "payload": { "transactionHex": transaction_hex },
    })
    .to_string()
}

/// Read signer responses from stdin until it closes, delivering each one.
pub fn spawn_response_reader(sink: ResponseSink) -> JoinHandle<()> {
    spawn_line_reader(BufReader::new(tokio::io::stdin()), sink)
}

/// Deliver each non-empty line of `reader` to `sink` until end of input.
pub fn spawn_line_reader<R>(reader: R, sink: ResponseSink) -> JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = reader.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    if let Err(e) = sink.deliver_json(&line) {
                        warn!(error = %e, "ignoring malformed signer message");
                    }
                }
                Ok(None) => {
                    debug!("signer closed its response stream");
                    break;
                }
                Err(e) => {
                    warn!(error = %e, "failed to read signer responses");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clout_identity::{ChannelTransport, RemoteIdentity, RemoteSignerConfig, TransportMessage};
    use clout_types::primitives::Address;
    use serde_json::Value;
    use std::sync::Arc;

    const ADDRESS: &str = "BC1YLhv73xX4vYcXGiCoinNMEfYE6zwX4BGn54vtdFr9RprYcAvpiB2";

    #[test]
    fn test_request_line_is_single_json_line() {
        let line = request_line(&RemoteRequest::sign("id-1", "00ff")).unwrap();
        assert!(!line.contains('\n'));
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["id"], "id-1");
        assert_eq!(value["method"], "sign");
        assert_eq!(value["payload"]["transactionHex"], "00ff");
    }

    #[test]
    fn test_approval_line_shape() {
        let value: Value = serde_json::from_str(&approval_line("abcd")).unwrap();
        assert_eq!(value["service"], "identity");
        assert_eq!(value["method"], "approve");
        assert_eq!(value["payload"]["transactionHex"], "abcd");
    }

    #[tokio::test]
    async fn test_line_reader_drives_approval_flow() {
        let (transport, mut rx) = ChannelTransport::new(8);
        let identity = RemoteIdentity::new(
            Address::from(ADDRESS),
            Arc::new(transport),
            RemoteSignerConfig::default(),
        );
        let (mut signer_out, reader_in) = tokio::io::duplex(1024);
        let reader = spawn_line_reader(BufReader::new(reader_in), identity.responses());

        let signer = tokio::spawn(async move {
            let TransportMessage::Request(req) = rx.recv().await.unwrap() else {
                panic!("expected a request");
            };
            let approval = format!(
                "{{\"id\":\"{}\",\"payload\":{{\"approvalRequired\":true}}}}\n\n",
                req.id
            );
            signer_out.write_all(approval.as_bytes()).await.unwrap();
            match rx.recv().await.unwrap() {
                TransportMessage::OpenApproval { transaction_hex } => {
                    assert_eq!(transaction_hex, "aa00")
                }
                other => panic!("expected approval, got {other:?}"),
            }
            signer_out
                .write_all(b"{\"payload\":{\"signedTransactionHex\":\"aa3045\"}}\n")
                .await
                .unwrap();
        });

        let signed = identity.sign_transaction("aa00").await.unwrap();
        assert_eq!(signed, "aa3045");
        assert_eq!(identity.pending_count(), 0);
        signer.await.unwrap();
        reader.await.unwrap();
    }
}
