use log::{debug, warn};
use tokio::sync::mpsc;

use crate::dht::{Announce, FetchRequest, NodeHandle};

/// Turns every announce event into a metadata-fetch request.
///
/// Fire-and-forget: the submission is an unbounded enqueue, so the announce
/// dispatch context is never blocked. Duplicate announcements produce
/// duplicate requests; coalescing is the node's job. Returns the number of
/// requests forwarded once the announce channel closes.
pub async fn run_bridge(
    mut announces: mpsc::UnboundedReceiver<Announce>,
    handle: NodeHandle,
) -> u64 {
    let mut forwarded: u64 = 0;

    while let Some(announce) = announces.recv().await {
        debug!(
            "peer {}:{} announced {}",
            announce.address,
            announce.port,
            hex::encode(announce.info_hash)
        );

        let request = FetchRequest {
            info_hash: announce.info_hash,
            address: announce.address,
            port: announce.port,
        };
        match handle.submit_fetch(request) {
            Ok(()) => forwarded += 1,
            // keep draining; the announce channel is about to close anyway
            Err(e) => warn!("dropping fetch request: {}", e),
        }
    }

    forwarded
}
