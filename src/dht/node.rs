use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;

use super::error::DiscoveryError;
use crate::torrent::parse_infohash;

/// A peer announcing that it holds content for an infohash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announce {
    pub info_hash: [u8; 20],
    pub address: String,
    pub port: u16,
}

/// A request to pull full metadata from one peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub info_hash: [u8; 20],
    pub address: String,
    pub port: u16,
}

/// A raw metadata blob received for an infohash.
#[derive(Debug, Clone)]
pub struct MetadataResponse {
    pub info_hash: [u8; 20],
    pub payload: Bytes,
}

/// The channel hub between the recording pipeline and the network engine.
///
/// The pipeline side keeps `handle` plus the two event receivers; the routing
/// and wire machinery lives outside this crate and drives the `driver` half.
/// Dropping the driver closes both event channels, which is how the consumer
/// loops learn that no further events will arrive.
pub struct Node {
    pub handle: NodeHandle,
    pub responses: mpsc::UnboundedReceiver<MetadataResponse>,
    pub announces: mpsc::UnboundedReceiver<Announce>,
    pub driver: NodeDriver,
}

impl Node {
    pub fn new() -> Self {
        let ready = Arc::new(AtomicBool::new(false));
        let (response_tx, responses) = mpsc::unbounded_channel();
        let (announce_tx, announces) = mpsc::unbounded_channel();
        let (fetch_tx, fetch_requests) = mpsc::unbounded_channel();
        let (discovery_tx, discovery_requests) = mpsc::unbounded_channel();

        Node {
            handle: NodeHandle {
                ready: Arc::clone(&ready),
                fetch_tx,
                discovery_tx,
            },
            responses,
            announces,
            driver: NodeDriver {
                ready,
                response_tx,
                announce_tx,
                fetch_requests,
                discovery_requests,
            },
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable request surface handed to the pipeline tasks.
#[derive(Clone)]
pub struct NodeHandle {
    ready: Arc<AtomicBool>,
    fetch_tx: mpsc::UnboundedSender<FetchRequest>,
    discovery_tx: mpsc::UnboundedSender<[u8; 20]>,
}

impl NodeHandle {
    /// Submits a discovery request for a 40-hex target infohash.
    ///
    /// Returns `NotReady` until the engine has signalled readiness; the
    /// request itself is an enqueue, completion is not awaited.
    pub fn request_discovery(&self, target: &str) -> Result<(), DiscoveryError> {
        let info_hash = parse_infohash(target)
            .map_err(|_| DiscoveryError::InvalidTarget(target.to_string()))?;

        if self.discovery_tx.is_closed() {
            return Err(DiscoveryError::Detached);
        }
        if !self.ready.load(Ordering::Acquire) {
            return Err(DiscoveryError::NotReady);
        }
        self.discovery_tx
            .send(info_hash)
            .map_err(|_| DiscoveryError::Detached)
    }

    /// Best-effort enqueue of a metadata-fetch request. Never blocks.
    pub fn submit_fetch(&self, request: FetchRequest) -> Result<(), DiscoveryError> {
        self.fetch_tx
            .send(request)
            .map_err(|_| DiscoveryError::Detached)
    }
}

/// Event/request surface held by the network engine.
pub struct NodeDriver {
    ready: Arc<AtomicBool>,
    response_tx: mpsc::UnboundedSender<MetadataResponse>,
    announce_tx: mpsc::UnboundedSender<Announce>,
    pub fetch_requests: mpsc::UnboundedReceiver<FetchRequest>,
    pub discovery_requests: mpsc::UnboundedReceiver<[u8; 20]>,
}

impl NodeDriver {
    /// Marks the node as bootstrapped; discovery submissions succeed from now on.
    pub fn set_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Feeds an announce event; returns false once the pipeline side is gone.
    pub fn push_announce(&self, announce: Announce) -> bool {
        self.announce_tx.send(announce).is_ok()
    }

    /// Feeds a raw metadata response; returns false once the pipeline side is gone.
    pub fn push_response(&self, response: MetadataResponse) -> bool {
        self.response_tx.send(response).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = "546cf15f724d19c4319cc17b179d7e035f89c1f4";

    #[test]
    fn test_discovery_not_ready_until_engine_signals() {
        let node = Node::new();
        assert_eq!(
            node.handle.request_discovery(TARGET),
            Err(DiscoveryError::NotReady)
        );

        node.driver.set_ready();
        assert_eq!(node.handle.request_discovery(TARGET), Ok(()));
    }

    #[tokio::test]
    async fn test_discovery_request_reaches_driver() {
        let mut node = Node::new();
        node.driver.set_ready();
        node.handle.request_discovery(TARGET).unwrap();

        let received = node.driver.discovery_requests.recv().await.unwrap();
        assert_eq!(hex::encode(received), TARGET);
    }

    #[test]
    fn test_invalid_target_is_terminal() {
        let node = Node::new();
        node.driver.set_ready();
        let err = node.handle.request_discovery("nonsense").unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidTarget(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_detached_engine_is_terminal_not_retryable() {
        let node = Node::new();
        drop(node.driver);
        let err = node.handle.request_discovery(TARGET).unwrap_err();
        assert_eq!(err, DiscoveryError::Detached);
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_request_reaches_driver() {
        let mut node = Node::new();
        let request = FetchRequest {
            info_hash: [7u8; 20],
            address: "10.0.0.9".to_string(),
            port: 6881,
        };
        node.handle.submit_fetch(request.clone()).unwrap();
        assert_eq!(node.driver.fetch_requests.recv().await.unwrap(), request);
    }

    #[tokio::test]
    async fn test_dropping_driver_closes_event_channels() {
        let mut node = Node::new();
        node.driver.push_response(MetadataResponse {
            info_hash: [1u8; 20],
            payload: Bytes::from_static(b"de"),
        });
        drop(node.driver);

        // buffered event is still delivered, then the channel reports closed
        assert!(node.responses.recv().await.is_some());
        assert!(node.responses.recv().await.is_none());
        assert!(node.announces.recv().await.is_none());
    }
}
