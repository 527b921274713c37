use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::{debug, error, info};
use tokio_util::sync::CancellationToken;

use metarec::bootstrap::run_bootstrap;
use metarec::bridge::run_bridge;
use metarec::config::Config;
use metarec::dht::Node;
use metarec::recorder::run_recorder;

/// Records torrent descriptors for metadata announced on the Mainline DHT.
#[derive(Parser, Debug)]
#[command(name = "metarec", version, about)]
struct Args {
    /// Path to the config file (written with defaults if absent)
    #[arg(short, long, default_value = "metarec.toml")]
    config: PathBuf,

    /// Crawl target infohash, overriding the config file
    #[arg(long)]
    target: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;
    let target = args
        .target
        .unwrap_or_else(|| config.bootstrap_target.clone());
    let interval = Duration::from_secs(config.retry_interval_secs);

    let node = Node::new();
    let cancel = CancellationToken::new();

    let recorder = tokio::spawn(run_recorder(
        node.responses,
        io::stdout(),
        config.max_metadata_size,
    ));
    let bridge = tokio::spawn(run_bridge(node.announces, node.handle.clone()));

    let handle = node.handle.clone();
    let bootstrap_target = target.clone();
    let mut bootstrap = tokio::spawn(run_bootstrap(
        move || handle.request_discovery(&bootstrap_target),
        interval,
        cancel.clone(),
    ));

    // The network engine owns the driver half of the node. On shutdown it is
    // dropped, which closes the event channels; the recorder and bridge then
    // drain whatever was already delivered and exit on their own.
    let driver = node.driver;
    let engine_cancel = cancel.clone();
    let engine = tokio::spawn(async move {
        engine_cancel.cancelled().await;
        drop(driver);
    });

    info!("metarec started, crawl target {}", target);

    let mut fatal = None;
    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("interrupt received, shutting down"),
        res = &mut bootstrap => match res? {
            Ok(outcome) => {
                debug!("bootstrap loop finished: {:?}", outcome);
                tokio::signal::ctrl_c().await?;
                info!("interrupt received, shutting down");
            }
            Err(e) => {
                error!("discovery bootstrap failed: {}", e);
                fatal = Some(e);
            }
        },
    }

    cancel.cancel();
    engine.await?;
    let emitted = recorder.await?;
    let forwarded = bridge.await?;
    info!(
        "{} descriptors recorded, {} fetch requests forwarded",
        emitted, forwarded
    );

    if let Some(e) = fatal {
        anyhow::bail!("discovery bootstrap failed: {}", e);
    }
    Ok(())
}
