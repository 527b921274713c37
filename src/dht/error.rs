use thiserror::Error;

/// Failure submitting a discovery request to the network node.
///
/// `NotReady` is the routine startup condition and is retried on a fixed
/// interval; the other variants are terminal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("node is not ready")]
    NotReady,

    #[error("invalid target infohash: {0}")]
    InvalidTarget(String),

    #[error("network engine detached")]
    Detached,
}

impl DiscoveryError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, DiscoveryError::NotReady)
    }
}
