//! Error types for the agent bridge.

use thiserror::Error;

/// Errors raised by the bridge tasks.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The WebSocket connection to the agent failed.
    #[error("agent connection failed: {0}")]
    Connect(#[from] tokio_tungstenite::tungstenite::Error),

    /// A command payload could not be encoded as JSON.
    #[error("command encoding failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An internal channel between bridge tasks rejected a message.
    #[error("internal channel unavailable: {0}")]
    ChannelClosed(&'static str),
}

/// Convenience alias for bridge results.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn serialize_error_converts() {
        let bad = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ClientError::from(bad);
        assert_matches!(err, ClientError::Serialize(_));
        assert!(err.to_string().starts_with("command encoding failed"));
    }

    #[test]
    fn channel_closed_names_the_channel() {
        let err = ClientError::ChannelClosed("outbound");
        assert_eq!(err.to_string(), "internal channel unavailable: outbound");
    }

    #[test]
    fn connect_error_converts() {
        let ws = tokio_tungstenite::tungstenite::Error::ConnectionClosed;
        let err = ClientError::from(ws);
        assert_matches!(err, ClientError::Connect(_));
        assert!(err.to_string().starts_with("agent connection failed"));
    }
}
