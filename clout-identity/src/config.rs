use std::time::Duration;

use clout_types::constants::{DEFAULT_REMOTE_APPROVAL_TIMEOUT, DEFAULT_REMOTE_RESPONSE_TIMEOUT};

/// Bounds on the two waits of a remote-signing exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteSignerConfig {
    /// How long to wait for the first response to a request.
    pub response_timeout: Duration,
    /// How long to wait for the final response once approval is required.
    pub approval_timeout: Duration,
}

impl Default for RemoteSignerConfig {
    fn default() -> Self {
        Self {
            response_timeout: DEFAULT_REMOTE_RESPONSE_TIMEOUT,
            approval_timeout: DEFAULT_REMOTE_APPROVAL_TIMEOUT,
        }
    }
}

impl RemoteSignerConfig {
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    pub fn with_approval_timeout(mut self, timeout: Duration) -> Self {
        self.approval_timeout = timeout;
        self
    }
}
