//! Bridge configuration.

use std::time::Duration;

use kel_settings::{DEFAULT_AGENT_HOST, DEFAULT_AGENT_PORT, Settings};

/// Delay between reconnect attempts after a dropped connection.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(10);

/// Inbound silence on a protocol channel before it is marked down.
pub const SILENCE_TIMEOUT: Duration = Duration::from_millis(15_000);

/// Runtime configuration for a [`crate::KelClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Agent hostname. `"localhost"` connects over `ws://`, anything else over `wss://`.
    pub host: String,
    /// Agent port.
    pub port: u16,
    /// Delay between reconnect attempts.
    pub reconnect_delay: Duration,
    /// Inbound silence before a protocol channel is marked down.
    pub silence_timeout: Duration,
    /// Capacity of each broadcast event channel.
    pub event_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_AGENT_HOST.to_owned(),
            port: DEFAULT_AGENT_PORT,
            reconnect_delay: RECONNECT_DELAY,
            silence_timeout: SILENCE_TIMEOUT,
            event_capacity: 64,
        }
    }
}

impl ClientConfig {
    /// Builds a config from persisted settings, keeping built-in timings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_local_agent() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8081);
    }

    #[test]
    fn default_timings() {
        let config = ClientConfig::default();
        assert_eq!(config.reconnect_delay, Duration::from_secs(10));
        assert_eq!(config.silence_timeout, Duration::from_millis(15_000));
        assert_eq!(config.event_capacity, 64);
    }

    #[test]
    fn from_settings_overrides_target_only() {
        let settings = Settings {
            host: "shack.example.net".to_owned(),
            port: 9000,
        };
        let config = ClientConfig::from_settings(&settings);
        assert_eq!(config.host, "shack.example.net");
        assert_eq!(config.port, 9000);
        assert_eq!(config.reconnect_delay, RECONNECT_DELAY);
        assert_eq!(config.silence_timeout, SILENCE_TIMEOUT);
    }
}
