//! The outer wire object carried on the agent socket.
//!
//! Every message is a JSON object with at most one protocol key populated:
//!
//! ```json
//! { "wsjtx": { "type": "HeartbeatMessage", "payload": { ... } } }
//! ```
//!
//! An object with neither key is valid and affects nothing; unknown keys
//! are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kind::{HamlibKind, WsjtxKind};

/// One protocol's message: a kind discriminant plus its payload.
///
/// The discriminant stays a raw string so frames carrying kinds this build
/// does not know about still deserialize; the router decides what to do
/// with them after marking activity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProtocolFrame {
    /// Message kind discriminant, e.g. `"HeartbeatMessage"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Kind-specific payload, decoded downstream. `Null` when absent.
    #[serde(default)]
    pub payload: Value,
}

impl ProtocolFrame {
    /// Extract `payload.id` when it is present as a string.
    #[must_use]
    pub fn payload_id(&self) -> Option<&str> {
        self.payload.get("id").and_then(Value::as_str)
    }
}

/// Outer wire object: at most one protocol key populated per message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// WSJT-X bridge message, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wsjtx: Option<ProtocolFrame>,
    /// Hamlib bridge message, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hamlib: Option<ProtocolFrame>,
}

impl Envelope {
    /// Wrap a WSJT-X payload into a complete envelope.
    pub fn wsjtx_frame<T: Serialize>(
        kind: WsjtxKind,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            wsjtx: Some(ProtocolFrame {
                kind: kind.as_str().to_owned(),
                payload: serde_json::to_value(payload)?,
            }),
            hamlib: None,
        })
    }

    /// Wrap a Hamlib payload into a complete envelope.
    pub fn hamlib_frame<T: Serialize>(
        kind: HamlibKind,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            wsjtx: None,
            hamlib: Some(ProtocolFrame {
                kind: kind.as_str().to_owned(),
                payload: serde_json::to_value(payload)?,
            }),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
