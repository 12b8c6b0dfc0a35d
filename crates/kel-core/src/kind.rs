//! Message kind discriminants for both bridged protocols.
//!
//! Every variant carries an exact `#[serde(rename)]` matching the wire
//! string the agent uses (e.g. `"HeartbeatMessage"`). The envelope keeps
//! the discriminant as a raw string so unknown kinds still parse; these
//! enums are the typed side of that string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// WSJT-X bridge message kinds, both directions.
///
/// Inbound kinds arrive from the application via the agent; outbound kinds
/// are commands the bridge sends. `Clear` travels in both directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WsjtxKind {
    // -- Inbound --
    /// Periodic presence signal from the application.
    #[serde(rename = "HeartbeatMessage")]
    Heartbeat,
    /// Internal state snapshot, sent on every relevant change.
    #[serde(rename = "StatusMessage")]
    Status,
    /// A completed decode (new or replayed).
    #[serde(rename = "DecodeMessage")]
    Decode,
    /// Band Activity / Rx Frequency window cleared; also sendable as a command.
    #[serde(rename = "ClearMessage")]
    Clear,
    /// The user accepted the Log QSO dialog.
    #[serde(rename = "QsoLoggedMessage")]
    QsoLogged,
    /// The application is shutting down gracefully.
    #[serde(rename = "CloseMessage")]
    Close,
    /// A completed WSPR-mode decode.
    #[serde(rename = "WSPRDecodeMessage")]
    WsprDecode,
    /// ADIF record for a logged QSO.
    #[serde(rename = "LoggedAdifMessage")]
    LoggedAdif,

    // -- Outbound commands --
    /// Ask the application to resend every undiscarded decode.
    #[serde(rename = "ReplayMessage")]
    Replay,
    /// Stop transmitting, immediately or after the current round.
    #[serde(rename = "HaltTxMessage")]
    HaltTx,
    /// Double-click a prior decode (initiate a QSO).
    #[serde(rename = "ReplyMessage")]
    Reply,
    /// Color a callsign in the Band Activity panel.
    #[serde(rename = "HighlightCallsignMessage")]
    HighlightCallsign,
    /// Set (and optionally transmit) the free text message.
    #[serde(rename = "FreeTextMessage")]
    FreeText,
    /// Override the local station's Maidenhead grid for this session.
    #[serde(rename = "LocationMessage")]
    Location,
    /// Switch to a named configuration set.
    #[serde(rename = "SwitchConfigurationMessage")]
    SwitchConfiguration,
    /// Adjust individual configuration parameters.
    #[serde(rename = "ConfigureMessage")]
    Configure,
}

/// All WSJT-X kinds, inbound first.
pub const ALL_WSJTX_KINDS: [WsjtxKind; 16] = [
    WsjtxKind::Heartbeat,
    WsjtxKind::Status,
    WsjtxKind::Decode,
    WsjtxKind::Clear,
    WsjtxKind::QsoLogged,
    WsjtxKind::Close,
    WsjtxKind::WsprDecode,
    WsjtxKind::LoggedAdif,
    WsjtxKind::Replay,
    WsjtxKind::HaltTx,
    WsjtxKind::Reply,
    WsjtxKind::HighlightCallsign,
    WsjtxKind::FreeText,
    WsjtxKind::Location,
    WsjtxKind::SwitchConfiguration,
    WsjtxKind::Configure,
];

impl WsjtxKind {
    /// The exact wire string for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heartbeat => "HeartbeatMessage",
            Self::Status => "StatusMessage",
            Self::Decode => "DecodeMessage",
            Self::Clear => "ClearMessage",
            Self::QsoLogged => "QsoLoggedMessage",
            Self::Close => "CloseMessage",
            Self::WsprDecode => "WSPRDecodeMessage",
            Self::LoggedAdif => "LoggedAdifMessage",
            Self::Replay => "ReplayMessage",
            Self::HaltTx => "HaltTxMessage",
            Self::Reply => "ReplyMessage",
            Self::HighlightCallsign => "HighlightCallsignMessage",
            Self::FreeText => "FreeTextMessage",
            Self::Location => "LocationMessage",
            Self::SwitchConfiguration => "SwitchConfigurationMessage",
            Self::Configure => "ConfigureMessage",
        }
    }

    /// Whether this kind carries continuously-valid state that the bridge
    /// caches (heartbeat, status).
    #[must_use]
    pub fn is_snapshot(self) -> bool {
        matches!(self, Self::Heartbeat | Self::Status)
    }

    /// Whether the application sends this kind to the bridge.
    #[must_use]
    pub fn is_inbound(self) -> bool {
        matches!(
            self,
            Self::Heartbeat
                | Self::Status
                | Self::Decode
                | Self::Clear
                | Self::QsoLogged
                | Self::Close
                | Self::WsprDecode
                | Self::LoggedAdif
        )
    }

    /// Whether the bridge sends this kind to the application.
    #[must_use]
    pub fn is_outbound(self) -> bool {
        !self.is_inbound() || self == Self::Clear
    }
}

impl fmt::Display for WsjtxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WsjtxKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Serde is the source of truth: the `#[serde(rename)]` attributes
        // define the wire strings.
        serde_json::from_value(serde_json::Value::String(s.to_owned()))
            .map_err(|_| format!("unknown wsjtx message kind: {s}"))
    }
}

/// Hamlib bridge message kinds. Receive-only: the schema carries no
/// addressable client id, so there is no command direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HamlibKind {
    /// Snapshot of the transceiver's current VFO state.
    #[serde(rename = "RigState")]
    RigState,
}

/// All Hamlib kinds.
pub const ALL_HAMLIB_KINDS: [HamlibKind; 1] = [HamlibKind::RigState];

impl HamlibKind {
    /// The exact wire string for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RigState => "RigState",
        }
    }

    /// Whether this kind carries continuously-valid state that the bridge
    /// caches.
    #[must_use]
    pub fn is_snapshot(self) -> bool {
        matches!(self, Self::RigState)
    }
}

impl fmt::Display for HamlibKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HamlibKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_owned()))
            .map_err(|_| format!("unknown hamlib message kind: {s}"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
