// lib.rs - Library interface for the DHT metadata recorder

pub mod bencode;
pub mod bootstrap;
pub mod bridge;
pub mod config;
pub mod dht;
pub mod recorder;
pub mod torrent;

// Re-export commonly used types for easier testing
pub use bencode::{decode, BValue, BencodeError};
pub use bootstrap::{run_bootstrap, BootstrapOutcome};
pub use bridge::run_bridge;
pub use config::Config;
pub use dht::{Announce, DiscoveryError, FetchRequest, MetadataResponse, Node};
pub use recorder::run_recorder;
pub use torrent::{normalize, parse_infohash, Descriptor, FileEntry, RejectReason};
