pub mod error;
pub mod node;

pub use error::DiscoveryError; // re-export
pub use node::{Announce, FetchRequest, MetadataResponse, Node, NodeDriver, NodeHandle};
