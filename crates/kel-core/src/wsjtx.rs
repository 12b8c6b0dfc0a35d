//! Typed payload records for every WSJT-X bridge message kind.
//!
//! Field names serialize in camelCase, exactly as the agent puts them on
//! the wire. Numeric widths follow the application's network protocol
//! (quint32 fields are `u32`, the SNR is signed).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Periodic presence signal, sent every 15 seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxHeartbeat {
    /// Client name, used to address commands back to this instance.
    pub id: String,
    /// Highest schema version the client supports.
    pub max_schema_version: u32,
    /// Client's commit hash.
    pub revision: String,
    /// Client's semantic version.
    pub version: String,
}

/// Internal state snapshot, sent whenever relevant state changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxStatus {
    /// Name of the active configuration set.
    pub config_name: String,
    /// Local station's callsign.
    pub de_call: String,
    /// Local station's Maidenhead grid.
    pub de_grid: String,
    /// Whether the application is currently decoding.
    pub decoding: bool,
    /// Connected transceiver's dial frequency in hertz.
    pub dial_frequency: u64,
    /// Remote station's callsign.
    pub dx_call: String,
    /// Remote station's Maidenhead grid.
    pub dx_grid: String,
    /// Whether fast mode is enabled for the slow protocols.
    pub fast_mode: bool,
    /// Decoding frequency tolerance in hertz, `u32::MAX` when not applicable.
    pub frequency_tolerance: u32,
    /// Client name.
    pub id: String,
    /// Receive protocol currently being decoded.
    pub mode: String,
    /// Local station's signal report for the remote station.
    pub report: String,
    /// Listening frequency in hertz above the dial frequency.
    pub rx_delta_freq: u32,
    /// Non-zero when in a special mode like Fox/Hound or Field Day.
    pub special_mode: u8,
    /// Submode letter, empty when the mode has none.
    pub submode: String,
    /// Whether the application is transmitting.
    pub transmitting: bool,
    /// Transmit frequency in hertz above the dial frequency.
    pub tx_delta_freq: u32,
    /// Whether transmitting is allowed during the next window.
    pub tx_enabled: bool,
    /// Protocol used for transmitting.
    pub tx_mode: String,
    /// Transmit/receive period in seconds, `u32::MAX` when not applicable.
    pub tx_rx_period: u32,
    /// Whether the transmit watchdog has tripped.
    pub tx_watchdog: bool,
    /// The message being transmitted.
    pub tx_message: String,
}

/// A completed decode. Also sent in response to a replay command, with
/// `new` false for each old decode still in the Band Activity window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxDecode {
    /// Decode's frequency in hertz above the dial frequency.
    pub delta_frequency: u32,
    /// Perceived clock differential to the remote station, in seconds.
    pub delta_time: f64,
    /// Client name.
    pub id: String,
    /// Whether the decoder had low confidence in this decode.
    pub low_confidence: bool,
    /// The decoded message text.
    pub message: String,
    /// Protocol of the decoded message.
    pub mode: String,
    /// Whether the decode is new (true) or replayed (false).
    #[serde(rename = "new")]
    pub is_new: bool,
    /// Whether the decode came from playback of a recording.
    pub off_air: bool,
    /// Perceived signal to noise ratio.
    pub snr: i32,
    /// Clock time in milliseconds since midnight UTC.
    pub time: u32,
}

/// Prior decodes in a window were discarded. Sendable as a command with a
/// window selector; the application's own notifications omit `window`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxClear {
    /// Client name.
    pub id: String,
    /// Which window to clear: 0 Band Activity, 1 Rx Frequency, 2 both.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<u8>,
}

/// The user accepted the Log QSO dialog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxQsoLogged {
    /// Operator comments.
    pub comments: String,
    /// Time the QSO ended.
    pub date_time_off: DateTime<Utc>,
    /// Time the QSO started.
    pub date_time_on: DateTime<Utc>,
    /// Remote station's callsign.
    pub dx_call: String,
    /// Remote station's Maidenhead grid.
    pub dx_grid: String,
    /// Contest exchange received.
    pub exchange_received: String,
    /// Contest exchange sent.
    pub exchange_sent: String,
    /// Protocol the QSO was made in.
    pub mode: String,
    /// Local station's callsign.
    pub my_call: String,
    /// Local station's Maidenhead grid.
    pub my_grid: String,
    /// Remote operator's name.
    pub name: String,
    /// Remote operator's callsign, if different from the station.
    pub operator_call: String,
    /// Signal report received from the remote station.
    pub report_received: String,
    /// Signal report sent to the remote station.
    pub report_sent: String,
    /// Frequency in hertz.
    pub tx_frequency: u64,
    /// Power in watts.
    pub tx_power: String,
    /// Client name.
    pub id: String,
    /// Propagation mode, ADIF enumeration.
    pub propagation_mode: String,
}

/// Sent immediately before the application shuts down gracefully.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxClose {
    /// Client name.
    pub id: String,
}

/// Ask the application to resend every undiscarded decode, `new` false,
/// followed by a status message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxReplay {
    /// Client name.
    pub id: String,
}

/// Stop the client from transmitting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxHaltTx {
    /// Client name.
    pub id: String,
    /// False halts the ongoing transmission immediately; true only
    /// disables auto-transmit after the current round.
    pub auto_tx_only: bool,
}

/// Initiate a QSO by double-clicking a prior decode. The application only
/// acts when the fields exactly describe a decode it still holds and that
/// decode is a CQ or QRZ message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxReply {
    /// Client name.
    pub id: String,
    /// Clock time in milliseconds since midnight UTC.
    pub time: u32,
    /// Perceived signal to noise ratio.
    pub snr: i32,
    /// Perceived clock differential to the remote station, in seconds.
    pub delta_time: f64,
    /// Decode's frequency in hertz above the dial frequency.
    pub delta_frequency: u32,
    /// Protocol of the decoded message.
    pub mode: String,
    /// The decoded message text.
    pub message: String,
    /// Whether the decoder had low confidence in the decode.
    pub low_confidence: bool,
    /// Keyboard modifiers to apply "as if" held during the double-click.
    /// Omitted from the wire when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<u32>,
}

/// Set the free text message content, optionally transmitting it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxFreeText {
    /// Client name.
    pub id: String,
    /// Text to send. May be silently truncated if too long to encode.
    pub text: String,
    /// Whether to begin transmitting when appropriate.
    pub send: bool,
}

/// A completed WSPR-mode decode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxWsprDecode {
    /// Client name.
    pub id: String,
    /// Whether the decode is new (true) or replayed (false).
    #[serde(rename = "new")]
    pub is_new: bool,
    /// Clock time in milliseconds since midnight UTC.
    pub time: u32,
    /// Perceived signal to noise ratio.
    pub snr: i32,
    /// Perceived clock differential to the remote station, in seconds.
    pub delta_time: f64,
    /// Absolute frequency in hertz.
    pub frequency: u64,
    /// Drift in hertz per second.
    pub drift: i32,
    /// Remote station's callsign.
    pub callsign: String,
    /// Remote station's Maidenhead grid.
    pub grid: String,
    /// Power in dBm.
    pub power: i32,
    /// Whether the decode came from playback of a recording.
    pub off_air: bool,
}

/// Session-lifetime override of the local station's grid locator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxLocation {
    /// Client name.
    pub id: String,
    /// Maidenhead grid to use as the local station's position.
    pub location: String,
}

/// ADIF record emitted when the user accepts the Log QSO dialog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxLoggedAdif {
    /// Client name.
    pub id: String,
    /// ADIF encoded QSO data.
    pub adif: String,
}

/// Color a callsign in the Band Activity panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxHighlightCallsign {
    /// Client name.
    pub id: String,
    /// Callsign to highlight.
    pub callsign: String,
    /// Background color, any CSS Color Module Level 4 format.
    pub background_color: String,
    /// Foreground color, any CSS Color Module Level 4 format.
    pub foreground_color: String,
    /// Highlight instances in the last period only, not all periods.
    pub highlight_last: bool,
    /// Reset highlighting to default, overriding the colors.
    pub reset: bool,
}

/// Switch to a named configuration set. The configuration must exist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxSwitchConfiguration {
    /// Client name.
    pub id: String,
    /// Name of the configuration set to activate.
    pub configuration_name: String,
}

/// Adjust individual configuration parameters. Empty strings mean "no
/// change"; for the quint32 fields, `u32::MAX` means "no change". Invalid
/// values are silently ignored by the application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsjtxConfigure {
    /// Client name.
    pub id: String,
    /// Protocol to decode and send.
    pub mode: String,
    /// Decoding frequency tolerance in hertz.
    pub frequency_tolerance: u32,
    /// Submode letter, empty for no change.
    pub submode: String,
    /// Whether fast mode is enabled for the slow protocols.
    pub fast_mode: bool,
    /// Transmit/receive period in seconds.
    pub tr_period: u32,
    /// Receive delta frequency in hertz above the dial.
    #[serde(rename = "rxDF")]
    pub rx_df: u32,
    /// Remote station's callsign.
    pub dx_call: String,
    /// Remote station's Maidenhead grid.
    pub dx_grid: String,
    /// Regenerate the standard messages.
    pub generate_messages: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
