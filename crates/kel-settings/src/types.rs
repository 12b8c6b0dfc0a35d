//! The settings record and its compiled defaults.

use serde::{Deserialize, Serialize};

/// Default agent host. The bridge speaks plain `ws://` only to this exact
/// loopback name; any other host gets `wss://`.
pub const DEFAULT_AGENT_HOST: &str = "localhost";

/// Default agent WebSocket port.
pub const DEFAULT_AGENT_PORT: u16 = 8081;

/// Where to reach the local agent process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Agent host name.
    pub host: String,
    /// Agent WebSocket port.
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_AGENT_HOST.to_owned(),
            port: DEFAULT_AGENT_PORT,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
