use std::time::Duration;

use log::{debug, info};
use tokio_util::sync::CancellationToken;

use crate::dht::DiscoveryError;

/// How the bootstrap loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The crawl target was submitted; the loop never runs again.
    Submitted,
    /// Shutdown was signalled before a submission succeeded.
    Cancelled,
}

/// Seeds the crawl by submitting one discovery request, retrying on a fixed
/// interval for as long as the node reports `NotReady`. No backoff growth,
/// no retry budget. Terminal errors are returned to the caller, which treats
/// them as fatal for the process.
pub async fn run_bootstrap<F>(
    mut submit: F,
    interval: Duration,
    cancel: CancellationToken,
) -> Result<BootstrapOutcome, DiscoveryError>
where
    F: FnMut() -> Result<(), DiscoveryError>,
{
    loop {
        match submit() {
            Ok(()) => {
                info!("crawl target submitted");
                return Ok(BootstrapOutcome::Submitted);
            }
            Err(e) if e.is_retryable() => {
                debug!("discovery not ready, retrying in {:?}", interval);
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = cancel.cancelled() => return Ok(BootstrapOutcome::Cancelled),
                }
            }
            Err(e) => return Err(e),
        }
    }
}
