use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Infohash of ubuntu-14.04.2-desktop-amd64.iso, the traditional well-seeded
/// target for kicking off a crawl.
pub const DEFAULT_BOOTSTRAP_TARGET: &str = "546cf15f724d19c4319cc17b179d7e035f89c1f4";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 40-hex infohash seeding the crawl at startup.
    pub bootstrap_target: String,
    /// Fixed delay between discovery submissions while the node is not ready.
    pub retry_interval_secs: u64,
    /// Metadata blobs larger than this are dropped unread.
    pub max_metadata_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bootstrap_target: DEFAULT_BOOTSTRAP_TARGET.to_string(),
            retry_interval_secs: 1,
            max_metadata_size: 65536,
        }
    }
}

impl Config {
    /// Reads the config file if it exists; otherwise writes the defaults out
    /// so the operator has something to edit.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("parsing config {}", path.display()))?;
            Ok(config)
        } else {
            let config = Self::default();
            // Save default config
            let toml = toml::to_string(&config)?;
            fs::write(path, toml)
                .with_context(|| format!("writing default config {}", path.display()))?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metarec.toml");
        fs::write(
            &path,
            "bootstrap_target = \"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\"\n\
             retry_interval_secs = 3\n\
             max_metadata_size = 1024\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.bootstrap_target, "a".repeat(40));
        assert_eq!(config.retry_interval_secs, 3);
        assert_eq!(config.max_metadata_size, 1024);
    }

    #[test]
    fn test_partial_file_uses_field_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metarec.toml");
        fs::write(&path, "retry_interval_secs = 9\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.retry_interval_secs, 9);
        assert_eq!(config.bootstrap_target, DEFAULT_BOOTSTRAP_TARGET);
        assert_eq!(config.max_metadata_size, 65536);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metarec.toml");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.bootstrap_target, DEFAULT_BOOTSTRAP_TARGET);

        // the defaults were persisted and parse back identically
        let reloaded = Config::load(&path).unwrap();
        assert_eq!(reloaded.retry_interval_secs, config.retry_interval_secs);
        assert_eq!(reloaded.bootstrap_target, config.bootstrap_target);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metarec.toml");
        fs::write(&path, "retry_interval_secs = \"soon\"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
