//! `[serve]` section configuration.
//!
//! Contains HTTP server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 8001                 # HTTP port number
//! workers = 4                 # Request worker threads
//! max_source = "1MB"          # Largest accepted decompressed source
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server accessible from LAN.

use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::config::util::parse_size;

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Worker threads rendering requests concurrently.
    pub workers: usize,

    /// Cap on decompressed diagram source.
    /// Supports suffixes: B, KB, MB (e.g., "64KB", "1MB").
    pub max_source: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 8001,
            workers: 4,
            max_source: "1MB".to_string(),
        }
    }
}

impl ServeConfig {
    /// Parse `max_source` to bytes. `None` if malformed.
    pub fn max_source_bytes(&self) -> Option<usize> {
        parse_size(&self.max_source)
    }
}
