//! Client-facing WSJT-X handle: cached state, event streams, commands.

use kel_core::{
    Envelope, WsjtxClear, WsjtxClose, WsjtxConfigure, WsjtxDecode, WsjtxFreeText, WsjtxHaltTx,
    WsjtxHeartbeat, WsjtxHighlightCallsign, WsjtxKind, WsjtxLocation, WsjtxLoggedAdif,
    WsjtxQsoLogged, WsjtxReplay, WsjtxReply, WsjtxStatus, WsjtxSwitchConfiguration,
    WsjtxWsprDecode,
};
use metrics::counter;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{trace, warn};

use crate::error::{ClientError, Result};

/// Command address used until the application reports its own id.
pub const DEFAULT_WSJTX_ID: &str = "WSJT-X";

/// Which decode window a clear command targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearWindow {
    /// The Band Activity window.
    BandActivity,
    /// The Rx Frequency window.
    RxFrequency,
    /// Both windows.
    Both,
}

impl ClearWindow {
    fn as_u8(self) -> u8 {
        match self {
            Self::BandActivity => 0,
            Self::RxFrequency => 1,
            Self::Both => 2,
        }
    }
}

/// Parameters for a configure command.
///
/// The defaults change nothing: empty strings and `u32::MAX` both mean
/// "leave unchanged" to the application, so callers set only the fields
/// they care about.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigureParams {
    /// Protocol to decode and send.
    pub mode: String,
    /// Decode frequency tolerance in hertz.
    pub frequency_tolerance: u32,
    /// Submode of the current protocol.
    pub submode: String,
    /// Whether fast mode is enabled.
    pub fast_mode: bool,
    /// Transmit/receive period in seconds.
    pub tr_period: u32,
    /// Receive delta frequency in hertz above the dial.
    pub rx_df: u32,
    /// Remote station's callsign.
    pub dx_call: String,
    /// Remote station's Maidenhead grid.
    pub dx_grid: String,
    /// Regenerate the standard messages.
    pub generate_messages: bool,
}

impl Default for ConfigureParams {
    fn default() -> Self {
        Self {
            mode: String::new(),
            frequency_tolerance: u32::MAX,
            submode: String::new(),
            fast_mode: false,
            tr_period: u32::MAX,
            rx_df: u32::MAX,
            dx_call: String::new(),
            dx_grid: String::new(),
            generate_messages: false,
        }
    }
}

/// Access to the WSJT-X side of the bridge.
///
/// Cheap to clone; every clone observes the same state. Commands are
/// fire-and-forget: they are stamped with the last id seen on the wire
/// and dropped when no agent connection is up.
#[derive(Clone)]
pub struct WsjtxHandle {
    pub(crate) liveness: watch::Receiver<bool>,
    pub(crate) last_seen_id: watch::Receiver<String>,
    pub(crate) heartbeat: watch::Receiver<Option<WsjtxHeartbeat>>,
    pub(crate) status: watch::Receiver<Option<WsjtxStatus>>,
    pub(crate) decodes: broadcast::Sender<WsjtxDecode>,
    pub(crate) clears: broadcast::Sender<WsjtxClear>,
    pub(crate) qsos_logged: broadcast::Sender<WsjtxQsoLogged>,
    pub(crate) closes: broadcast::Sender<WsjtxClose>,
    pub(crate) wspr_decodes: broadcast::Sender<WsjtxWsprDecode>,
    pub(crate) logged_adif: broadcast::Sender<WsjtxLoggedAdif>,
    pub(crate) outbound: mpsc::Sender<Envelope>,
}

impl WsjtxHandle {
    /// Watch for protocol up/down transitions.
    #[must_use]
    pub fn liveness(&self) -> watch::Receiver<bool> {
        self.liveness.clone()
    }

    /// Whether the protocol is currently up.
    #[must_use]
    pub fn is_live(&self) -> bool {
        *self.liveness.borrow()
    }

    /// Latest heartbeat, or `None` while the protocol is down.
    #[must_use]
    pub fn heartbeat(&self) -> Option<WsjtxHeartbeat> {
        self.heartbeat.borrow().clone()
    }

    /// Latest status snapshot, or `None` while the protocol is down.
    #[must_use]
    pub fn status(&self) -> Option<WsjtxStatus> {
        self.status.borrow().clone()
    }

    /// Watch status snapshots as they change.
    #[must_use]
    pub fn watch_status(&self) -> watch::Receiver<Option<WsjtxStatus>> {
        self.status.clone()
    }

    /// The id commands are currently addressed to.
    #[must_use]
    pub fn last_seen_id(&self) -> String {
        self.last_seen_id.borrow().clone()
    }

    /// Subscribe to decode notifications.
    #[must_use]
    pub fn subscribe_decodes(&self) -> broadcast::Receiver<WsjtxDecode> {
        self.decodes.subscribe()
    }

    /// Subscribe to window-clear notifications.
    #[must_use]
    pub fn subscribe_clears(&self) -> broadcast::Receiver<WsjtxClear> {
        self.clears.subscribe()
    }

    /// Subscribe to logged QSO notifications.
    #[must_use]
    pub fn subscribe_qsos_logged(&self) -> broadcast::Receiver<WsjtxQsoLogged> {
        self.qsos_logged.subscribe()
    }

    /// Subscribe to application shutdown notices.
    #[must_use]
    pub fn subscribe_closes(&self) -> broadcast::Receiver<WsjtxClose> {
        self.closes.subscribe()
    }

    /// Subscribe to WSPR decode notifications.
    #[must_use]
    pub fn subscribe_wspr_decodes(&self) -> broadcast::Receiver<WsjtxWsprDecode> {
        self.wspr_decodes.subscribe()
    }

    /// Subscribe to ADIF log records.
    #[must_use]
    pub fn subscribe_logged_adif(&self) -> broadcast::Receiver<WsjtxLoggedAdif> {
        self.logged_adif.subscribe()
    }

    // ─── Commands ───

    /// Clear one or both decode windows.
    pub fn clear(&self, window: ClearWindow) {
        let clear = WsjtxClear {
            id: self.last_seen_id(),
            window: Some(window.as_u8()),
        };
        self.send_command(WsjtxKind::Clear, &clear);
    }

    /// Ask for every undiscarded decode to be resent, `new` false.
    pub fn replay(&self) {
        let replay = WsjtxReplay {
            id: self.last_seen_id(),
        };
        self.send_command(WsjtxKind::Replay, &replay);
    }

    /// Halt any ongoing transmission immediately.
    pub fn halt_tx_now(&self) {
        let halt = WsjtxHaltTx {
            id: self.last_seen_id(),
            auto_tx_only: false,
        };
        self.send_command(WsjtxKind::HaltTx, &halt);
    }

    /// Disable auto-transmit after the current round completes.
    pub fn halt_tx_after_current(&self) {
        let halt = WsjtxHaltTx {
            id: self.last_seen_id(),
            auto_tx_only: true,
        };
        self.send_command(WsjtxKind::HaltTx, &halt);
    }

    /// Initiate a QSO with a decoded station, as if its line in the Band
    /// Activity window were double-clicked. The application only acts when
    /// the decode is one it still holds and is a CQ or QRZ message.
    pub fn reply(&self, decode: &WsjtxDecode) {
        let reply = WsjtxReply {
            id: decode.id.clone(),
            time: decode.time,
            snr: decode.snr,
            delta_time: decode.delta_time,
            delta_frequency: decode.delta_frequency,
            mode: decode.mode.clone(),
            message: decode.message.clone(),
            low_confidence: decode.low_confidence,
            modifiers: None,
        };
        self.send_command(WsjtxKind::Reply, &reply);
    }

    /// Color a callsign in the Band Activity window. Colors take any CSS
    /// Color Module Level 4 format.
    pub fn highlight_callsign(
        &self,
        callsign: &str,
        background_color: &str,
        foreground_color: &str,
        highlight_last: bool,
        reset: bool,
    ) {
        let highlight = WsjtxHighlightCallsign {
            id: self.last_seen_id(),
            callsign: callsign.to_owned(),
            background_color: background_color.to_owned(),
            foreground_color: foreground_color.to_owned(),
            highlight_last,
            reset,
        };
        self.send_command(WsjtxKind::HighlightCallsign, &highlight);
    }

    /// Set the free text message, optionally transmitting it.
    pub fn send_free_text(&self, text: &str, send: bool) {
        let free_text = WsjtxFreeText {
            id: self.last_seen_id(),
            text: text.to_owned(),
            send,
        };
        self.send_command(WsjtxKind::FreeText, &free_text);
    }

    /// Override the local station's grid locator for this session.
    pub fn set_location(&self, grid: &str) {
        let location = WsjtxLocation {
            id: self.last_seen_id(),
            location: grid.to_owned(),
        };
        self.send_command(WsjtxKind::Location, &location);
    }

    /// Switch to a named configuration set. The configuration must exist.
    pub fn switch_configuration(&self, name: &str) {
        let switch = WsjtxSwitchConfiguration {
            id: self.last_seen_id(),
            configuration_name: name.to_owned(),
        };
        self.send_command(WsjtxKind::SwitchConfiguration, &switch);
    }

    /// Adjust individual configuration parameters.
    pub fn configure(&self, params: ConfigureParams) {
        let configure = WsjtxConfigure {
            id: self.last_seen_id(),
            mode: params.mode,
            frequency_tolerance: params.frequency_tolerance,
            submode: params.submode,
            fast_mode: params.fast_mode,
            tr_period: params.tr_period,
            rx_df: params.rx_df,
            dx_call: params.dx_call,
            dx_grid: params.dx_grid,
            generate_messages: params.generate_messages,
        };
        self.send_command(WsjtxKind::Configure, &configure);
    }

    fn send_command<T: Serialize>(&self, kind: WsjtxKind, payload: &T) {
        match self.try_send_command(kind, payload) {
            Ok(()) => trace!(%kind, "command queued"),
            Err(ClientError::Serialize(e)) => {
                warn!(%kind, error = %e, "failed to encode command");
            }
            Err(e) => {
                counter!("agent_commands_dropped_total").increment(1);
                trace!(%kind, error = %e, "command dropped");
            }
        }
    }

    fn try_send_command<T: Serialize>(&self, kind: WsjtxKind, payload: &T) -> Result<()> {
        let envelope = Envelope::wsjtx_frame(kind, payload)?;
        self.outbound
            .try_send(envelope)
            .map_err(|_| ClientError::ChannelClosed("outbound"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
