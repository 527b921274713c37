use std::io::Write;

use log::{debug, warn};
use tokio::sync::mpsc;

use crate::bencode;
use crate::dht::MetadataResponse;
use crate::torrent::normalize;

/// Drains the metadata-response stream and writes one JSON record per
/// successfully normalized descriptor, each followed by a blank line.
///
/// Malformed or oversized blobs are dropped and logged; one bad event never
/// stalls the stream. The loop ends when the sending side closes, after every
/// already-delivered event has been processed. Returns the number of records
/// emitted.
pub async fn run_recorder<W: Write>(
    mut responses: mpsc::UnboundedReceiver<MetadataResponse>,
    mut out: W,
    max_metadata_size: usize,
) -> u64 {
    let mut emitted: u64 = 0;

    while let Some(response) = responses.recv().await {
        let infohash = hex::encode(response.info_hash);

        if response.payload.len() > max_metadata_size {
            debug!(
                "dropping {} byte metadata for {} (limit {})",
                response.payload.len(),
                infohash,
                max_metadata_size
            );
            continue;
        }

        let metadata = match bencode::decode(&response.payload) {
            Ok(value) => value,
            Err(e) => {
                debug!("undecodable metadata for {}: {}", infohash, e);
                continue;
            }
        };

        let descriptor = match normalize(&metadata, &response.info_hash) {
            Ok(descriptor) => descriptor,
            Err(reason) => {
                debug!("rejected metadata for {}: {}", infohash, reason);
                continue;
            }
        };

        let record = match serde_json::to_string(&descriptor) {
            Ok(record) => record,
            Err(e) => {
                warn!("could not serialize descriptor for {}: {}", infohash, e);
                continue;
            }
        };

        // Blank line after each record keeps the stream self-delimited.
        if let Err(e) = writeln!(out, "{}\n", record) {
            warn!("output sink error, record for {} lost: {}", infohash, e);
            continue;
        }

        debug!("recorded {} ({})", infohash, descriptor.name);
        emitted += 1;
    }

    emitted
}
