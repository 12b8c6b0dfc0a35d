//! Demultiplexes inbound envelopes onto typed per-protocol channels.
//!
//! One task owns all mutable routing state. Each frame marks activity on
//! its protocol channel before anything else, so even unknown kinds and
//! malformed payloads keep the channel alive. A channel that hears nothing
//! for the silence timeout is marked down and its cached snapshots are
//! cleared; a WSJT-X close notice marks that channel down immediately.

use std::time::Duration;

use kel_core::{
    Envelope, HamlibKind, HamlibRigState, ProtocolFrame, WsjtxClear, WsjtxClose, WsjtxDecode,
    WsjtxHeartbeat, WsjtxKind, WsjtxLoggedAdif, WsjtxQsoLogged, WsjtxStatus, WsjtxWsprDecode,
};
use metrics::counter;
use serde::de::DeserializeOwned;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::hamlib::HamlibHandle;
use crate::wsjtx::{DEFAULT_WSJTX_ID, WsjtxHandle};

/// Channel ends and routing state owned by the router task.
pub(crate) struct RouterTask {
    pub(crate) frames: mpsc::Receiver<Envelope>,
    pub(crate) wsjtx: WsjtxChannel,
    pub(crate) hamlib: HamlibChannel,
    pub(crate) silence_timeout: Duration,
    pub(crate) cancel: CancellationToken,
}

pub(crate) async fn run_router(mut task: RouterTask) {
    loop {
        let deadline = next_deadline(&task);
        tokio::select! {
            env = task.frames.recv() => {
                let Some(envelope) = env else { return };
                let expiry = Instant::now() + task.silence_timeout;
                if let Some(frame) = envelope.wsjtx {
                    task.wsjtx.handle_frame(&frame, expiry);
                }
                if let Some(frame) = envelope.hamlib {
                    task.hamlib.handle_frame(&frame, expiry);
                }
            }
            () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                let now = Instant::now();
                task.wsjtx.expire(now);
                task.hamlib.expire(now);
            }
            () = task.cancel.cancelled() => return,
        }
    }
}

fn next_deadline(task: &RouterTask) -> Option<Instant> {
    match (task.wsjtx.liveness.deadline, task.hamlib.liveness.deadline) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Decode a frame payload, dropping the frame when it does not match the
/// expected shape.
fn decode_payload<T: DeserializeOwned>(frame: &ProtocolFrame) -> Option<T> {
    match serde_json::from_value(frame.payload.clone()) {
        Ok(payload) => Some(payload),
        Err(e) => {
            counter!("agent_malformed_frames_total").increment(1);
            debug!(kind = %frame.kind, error = %e, "dropping malformed payload");
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Liveness
// ─────────────────────────────────────────────────────────────────────────────

/// Up/down state for one protocol channel, driven by inbound activity.
struct Liveness {
    protocol: &'static str,
    tx: watch::Sender<bool>,
    up: bool,
    deadline: Option<Instant>,
}

impl Liveness {
    fn new(protocol: &'static str) -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (
            Self {
                protocol,
                tx,
                up: false,
                deadline: None,
            },
            rx,
        )
    }

    fn mark_up(&mut self, expiry: Instant) {
        self.deadline = Some(expiry);
        if !self.up {
            self.up = true;
            let _ = self.tx.send_replace(true);
            info!(protocol = self.protocol, "channel up");
        }
    }

    /// Returns true on an up to down transition, so the caller can clear
    /// its cached snapshots.
    fn mark_down(&mut self, reason: &'static str) -> bool {
        self.deadline = None;
        if !self.up {
            return false;
        }
        self.up = false;
        let _ = self.tx.send_replace(false);
        info!(protocol = self.protocol, reason, "channel down");
        true
    }

    fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| d <= now)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WSJT-X channel
// ─────────────────────────────────────────────────────────────────────────────

/// Router-side state for the WSJT-X protocol.
pub(crate) struct WsjtxChannel {
    liveness: Liveness,
    last_seen_id: watch::Sender<String>,
    heartbeat: watch::Sender<Option<WsjtxHeartbeat>>,
    status: watch::Sender<Option<WsjtxStatus>>,
    decodes: broadcast::Sender<WsjtxDecode>,
    clears: broadcast::Sender<WsjtxClear>,
    qsos_logged: broadcast::Sender<WsjtxQsoLogged>,
    closes: broadcast::Sender<WsjtxClose>,
    wspr_decodes: broadcast::Sender<WsjtxWsprDecode>,
    logged_adif: broadcast::Sender<WsjtxLoggedAdif>,
}

impl WsjtxChannel {
    /// Builds the channel plus the public handle wired to it. `outbound`
    /// is where the handle's commands go.
    pub(crate) fn new(capacity: usize, outbound: mpsc::Sender<Envelope>) -> (Self, WsjtxHandle) {
        let capacity = capacity.max(1);
        let (liveness, liveness_rx) = Liveness::new("wsjtx");
        let (last_seen_id, last_seen_id_rx) = watch::channel(DEFAULT_WSJTX_ID.to_owned());
        let (heartbeat, heartbeat_rx) = watch::channel(None);
        let (status, status_rx) = watch::channel(None);
        let (decodes, _) = broadcast::channel(capacity);
        let (clears, _) = broadcast::channel(capacity);
        let (qsos_logged, _) = broadcast::channel(capacity);
        let (closes, _) = broadcast::channel(capacity);
        let (wspr_decodes, _) = broadcast::channel(capacity);
        let (logged_adif, _) = broadcast::channel(capacity);

        let handle = WsjtxHandle {
            liveness: liveness_rx,
            last_seen_id: last_seen_id_rx,
            heartbeat: heartbeat_rx,
            status: status_rx,
            decodes: decodes.clone(),
            clears: clears.clone(),
            qsos_logged: qsos_logged.clone(),
            closes: closes.clone(),
            wspr_decodes: wspr_decodes.clone(),
            logged_adif: logged_adif.clone(),
            outbound,
        };

        let channel = Self {
            liveness,
            last_seen_id,
            heartbeat,
            status,
            decodes,
            clears,
            qsos_logged,
            closes,
            wspr_decodes,
            logged_adif,
        };

        (channel, handle)
    }

    fn handle_frame(&mut self, frame: &ProtocolFrame, expiry: Instant) {
        self.liveness.mark_up(expiry);

        // Remember the sender's id before anything can reject the frame;
        // commands are addressed with the last id seen on the wire.
        if let Some(id) = frame.payload_id() {
            if *self.last_seen_id.borrow() != id {
                let _ = self.last_seen_id.send_replace(id.to_owned());
            }
        }

        let Ok(kind) = frame.kind.parse::<WsjtxKind>() else {
            counter!("agent_unknown_kind_total", "protocol" => "wsjtx").increment(1);
            debug!(kind = %frame.kind, "dropping unknown wsjtx kind");
            return;
        };

        match kind {
            WsjtxKind::Heartbeat => {
                if let Some(heartbeat) = decode_payload::<WsjtxHeartbeat>(frame) {
                    let _ = self.heartbeat.send_replace(Some(heartbeat));
                }
            }
            WsjtxKind::Status => {
                if let Some(status) = decode_payload::<WsjtxStatus>(frame) {
                    let _ = self.status.send_replace(Some(status));
                }
            }
            WsjtxKind::Decode => {
                if let Some(decode) = decode_payload::<WsjtxDecode>(frame) {
                    let _ = self.decodes.send(decode);
                }
            }
            WsjtxKind::Clear => {
                if let Some(clear) = decode_payload::<WsjtxClear>(frame) {
                    let _ = self.clears.send(clear);
                }
            }
            WsjtxKind::QsoLogged => {
                if let Some(qso) = decode_payload::<WsjtxQsoLogged>(frame) {
                    let _ = self.qsos_logged.send(qso);
                }
            }
            WsjtxKind::WsprDecode => {
                if let Some(wspr) = decode_payload::<WsjtxWsprDecode>(frame) {
                    let _ = self.wspr_decodes.send(wspr);
                }
            }
            WsjtxKind::LoggedAdif => {
                if let Some(adif) = decode_payload::<WsjtxLoggedAdif>(frame) {
                    let _ = self.logged_adif.send(adif);
                }
            }
            WsjtxKind::Close => {
                if let Some(close) = decode_payload::<WsjtxClose>(frame) {
                    let _ = self.closes.send(close);
                }
                self.mark_down("close notice");
            }
            WsjtxKind::Replay
            | WsjtxKind::HaltTx
            | WsjtxKind::Reply
            | WsjtxKind::HighlightCallsign
            | WsjtxKind::FreeText
            | WsjtxKind::Location
            | WsjtxKind::SwitchConfiguration
            | WsjtxKind::Configure => {
                debug!(%kind, "ignoring outbound-only kind on the inbound stream");
            }
        }
    }

    fn mark_down(&mut self, reason: &'static str) {
        if self.liveness.mark_down(reason) {
            let _ = self.heartbeat.send_replace(None);
            let _ = self.status.send_replace(None);
        }
    }

    fn expire(&mut self, now: Instant) {
        if self.liveness.expired(now) {
            self.mark_down("silence");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hamlib channel
// ─────────────────────────────────────────────────────────────────────────────

/// Router-side state for the Hamlib protocol. Receive-only.
pub(crate) struct HamlibChannel {
    liveness: Liveness,
    rig_state: watch::Sender<Option<HamlibRigState>>,
}

impl HamlibChannel {
    pub(crate) fn new() -> (Self, HamlibHandle) {
        let (liveness, liveness_rx) = Liveness::new("hamlib");
        let (rig_state, rig_state_rx) = watch::channel(None);
        let handle = HamlibHandle {
            liveness: liveness_rx,
            rig_state: rig_state_rx,
        };
        (Self { liveness, rig_state }, handle)
    }

    fn handle_frame(&mut self, frame: &ProtocolFrame, expiry: Instant) {
        self.liveness.mark_up(expiry);

        let Ok(kind) = frame.kind.parse::<HamlibKind>() else {
            counter!("agent_unknown_kind_total", "protocol" => "hamlib").increment(1);
            debug!(kind = %frame.kind, "dropping unknown hamlib kind");
            return;
        };

        match kind {
            HamlibKind::RigState => {
                if let Some(state) = decode_payload::<HamlibRigState>(frame) {
                    let _ = self.rig_state.send_replace(Some(state));
                }
            }
        }
    }

    fn expire(&mut self, now: Instant) {
        if self.liveness.expired(now) && self.liveness.mark_down("silence") {
            let _ = self.rig_state.send_replace(None);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SILENCE_TIMEOUT;
    use crate::wsjtx::ClearWindow;
    use serde_json::json;
    use tokio::time::advance;

    struct Fixture {
        frames: mpsc::Sender<Envelope>,
        outbound: mpsc::Receiver<Envelope>,
        wsjtx: WsjtxHandle,
        hamlib: HamlibHandle,
    }

    fn spawn_router() -> Fixture {
        let (frame_tx, frame_rx) = mpsc::channel(16);
        let (out_tx, out_rx) = mpsc::channel(16);
        let (wsjtx, wsjtx_handle) = WsjtxChannel::new(16, out_tx);
        let (hamlib, hamlib_handle) = HamlibChannel::new();
        let _ = tokio::spawn(run_router(RouterTask {
            frames: frame_rx,
            wsjtx,
            hamlib,
            silence_timeout: SILENCE_TIMEOUT,
            cancel: CancellationToken::new(),
        }));
        Fixture {
            frames: frame_tx,
            outbound: out_rx,
            wsjtx: wsjtx_handle,
            hamlib: hamlib_handle,
        }
    }

    /// Under a paused clock this completes only after every other task has
    /// gone idle, so the router has drained everything sent so far.
    async fn quiesce() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    fn heartbeat_env(id: &str) -> Envelope {
        serde_json::from_value(json!({
            "wsjtx": {"type": "HeartbeatMessage", "payload": {
                "id": id,
                "maxSchemaVersion": 3,
                "revision": "c19d62",
                "version": "2.5.2"
            }}
        }))
        .unwrap()
    }

    fn status_env() -> Envelope {
        serde_json::from_value(json!({
            "wsjtx": {"type": "StatusMessage", "payload": {
                "configName": "Default",
                "deCall": "K0TEST",
                "deGrid": "EN35",
                "decoding": false,
                "dialFrequency": 14_074_000u64,
                "dxCall": "",
                "dxGrid": "",
                "fastMode": false,
                "frequencyTolerance": 20,
                "id": "WSJT-X",
                "mode": "FT8",
                "report": "",
                "rxDeltaFreq": 1200,
                "specialMode": 0,
                "submode": "",
                "transmitting": false,
                "txDeltaFreq": 1200,
                "txEnabled": false,
                "txMode": "FT8",
                "txRxPeriod": 15,
                "txWatchdog": false,
                "txMessage": ""
            }}
        }))
        .unwrap()
    }

    fn decode_env(message: &str) -> Envelope {
        serde_json::from_value(json!({
            "wsjtx": {"type": "DecodeMessage", "payload": {
                "deltaFrequency": 1234,
                "deltaTime": 0.3,
                "id": "WSJT-X",
                "lowConfidence": false,
                "message": message,
                "mode": "~",
                "new": true,
                "offAir": false,
                "snr": -5,
                "time": 3_723_000
            }}
        }))
        .unwrap()
    }

    fn close_env() -> Envelope {
        serde_json::from_value(json!({
            "wsjtx": {"type": "CloseMessage", "payload": {"id": "WSJT-X"}}
        }))
        .unwrap()
    }

    fn rig_env(frequency: u64) -> Envelope {
        serde_json::from_value(json!({
            "hamlib": {"type": "RigState", "payload": {
                "model": "IC-7300",
                "frequency": frequency,
                "mode": "USB",
                "passbandWidthHz": 2400
            }}
        }))
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn no_frames_leaves_both_channels_down() {
        let f = spawn_router();
        quiesce().await;
        assert!(!f.wsjtx.is_live());
        assert!(!f.hamlib.is_live());
        assert_eq!(f.wsjtx.heartbeat(), None);
        assert_eq!(f.hamlib.rig_state(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn heartbeat_marks_up_and_caches_snapshot() {
        let f = spawn_router();
        f.frames.send(heartbeat_env("WSJT-X")).await.unwrap();
        quiesce().await;

        assert!(f.wsjtx.is_live());
        assert_eq!(f.wsjtx.heartbeat().unwrap().version, "2.5.2");
        assert_eq!(f.wsjtx.status(), None);
        assert!(!f.hamlib.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn last_seen_id_tracks_latest_frame() {
        let f = spawn_router();
        assert_eq!(f.wsjtx.last_seen_id(), "WSJT-X");

        f.frames.send(heartbeat_env("WSJT-X - Slice B")).await.unwrap();
        quiesce().await;
        assert_eq!(f.wsjtx.last_seen_id(), "WSJT-X - Slice B");
    }

    #[tokio::test(start_paused = true)]
    async fn silence_for_fifteen_seconds_marks_down() {
        let f = spawn_router();
        let live = f.wsjtx.liveness();
        f.frames.send(heartbeat_env("WSJT-X")).await.unwrap();
        quiesce().await; // processed at t=0, clock now 1ms
        assert!(*live.borrow());

        advance(Duration::from_millis(14_998)).await; // t=14_999, deadline is 15_000
        assert!(*live.borrow());

        advance(Duration::from_millis(2)).await;
        quiesce().await;
        assert!(!*live.borrow());
        assert_eq!(f.wsjtx.heartbeat(), None);
        assert_eq!(f.wsjtx.status(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn activity_rearms_the_silence_deadline() {
        let f = spawn_router();
        f.frames.send(heartbeat_env("WSJT-X")).await.unwrap();
        quiesce().await; // deadline 15_000, clock 1ms

        advance(Duration::from_millis(9_999)).await; // t=10_000
        f.frames.send(status_env()).await.unwrap();
        quiesce().await; // deadline now 25_000

        advance(Duration::from_millis(9_999)).await; // t=20_000, past the first deadline
        quiesce().await;
        assert!(f.wsjtx.is_live());

        advance(Duration::from_millis(5_001)).await; // t=25_002
        quiesce().await;
        assert!(!f.wsjtx.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn close_notice_marks_down_immediately() {
        let f = spawn_router();
        let mut closes = f.wsjtx.subscribe_closes();
        f.frames.send(heartbeat_env("WSJT-X")).await.unwrap();
        quiesce().await;
        assert!(f.wsjtx.is_live());

        f.frames.send(close_env()).await.unwrap();
        quiesce().await;
        assert!(!f.wsjtx.is_live());
        assert_eq!(f.wsjtx.heartbeat(), None);
        assert_eq!(closes.recv().await.unwrap().id, "WSJT-X");
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_kind_still_counts_as_activity() {
        let f = spawn_router();
        let mut decodes = f.wsjtx.subscribe_decodes();
        let env: Envelope = serde_json::from_value(json!({
            "wsjtx": {"type": "FutureMessage", "payload": {"id": "X1"}}
        }))
        .unwrap();
        f.frames.send(env).await.unwrap();
        quiesce().await;

        assert!(f.wsjtx.is_live());
        assert_eq!(f.wsjtx.last_seen_id(), "X1");
        assert!(decodes.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn inbound_command_echo_is_ignored_but_marks_activity() {
        let f = spawn_router();
        let env: Envelope = serde_json::from_value(json!({
            "wsjtx": {"type": "ReplayMessage", "payload": {"id": "WSJT-X"}}
        }))
        .unwrap();
        f.frames.send(env).await.unwrap();
        quiesce().await;
        assert!(f.wsjtx.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_envelope_is_harmless() {
        let f = spawn_router();
        f.frames.send(Envelope::default()).await.unwrap();
        quiesce().await;
        assert!(!f.wsjtx.is_live());
        assert!(!f.hamlib.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_payload_keeps_channel_up() {
        let f = spawn_router();
        let env: Envelope = serde_json::from_value(json!({
            "wsjtx": {"type": "HeartbeatMessage", "payload": {"id": 42}}
        }))
        .unwrap();
        f.frames.send(env).await.unwrap();
        quiesce().await;

        assert!(f.wsjtx.is_live());
        assert_eq!(f.wsjtx.heartbeat(), None);
        // A numeric id is not an addressable id.
        assert_eq!(f.wsjtx.last_seen_id(), "WSJT-X");
    }

    #[tokio::test(start_paused = true)]
    async fn rig_state_snapshot_is_cached() {
        let f = spawn_router();
        f.frames.send(rig_env(7_074_000)).await.unwrap();
        quiesce().await;

        assert!(f.hamlib.is_live());
        let rig = f.hamlib.rig_state().unwrap();
        assert_eq!(rig.model, "IC-7300");
        assert_eq!(rig.frequency, 7_074_000);
        assert!(!f.wsjtx.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn channels_time_out_independently() {
        let f = spawn_router();
        f.frames.send(heartbeat_env("WSJT-X")).await.unwrap();
        quiesce().await; // wsjtx deadline 15_000

        advance(Duration::from_millis(4_999)).await; // t=5_000
        f.frames.send(rig_env(7_074_000)).await.unwrap();
        quiesce().await; // hamlib deadline 20_000

        advance(Duration::from_millis(10_001)).await; // t=15_002
        quiesce().await;
        assert!(!f.wsjtx.is_live());
        assert!(f.hamlib.is_live());

        advance(Duration::from_millis(5_000)).await; // t=20_003
        quiesce().await;
        assert!(!f.hamlib.is_live());
        assert_eq!(f.hamlib.rig_state(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_frames_do_not_flap_liveness() {
        let f = spawn_router();
        let mut live = f.wsjtx.liveness();
        f.frames.send(heartbeat_env("WSJT-X")).await.unwrap();
        quiesce().await;
        assert!(*live.borrow_and_update());

        f.frames.send(heartbeat_env("WSJT-X")).await.unwrap();
        quiesce().await;
        assert!(!live.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn decode_events_reach_subscribers() {
        let f = spawn_router();
        let mut decodes = f.wsjtx.subscribe_decodes();
        f.frames.send(decode_env("CQ K0TEST EN35")).await.unwrap();

        let decode = decodes.recv().await.unwrap();
        assert_eq!(decode.message, "CQ K0TEST EN35");
        assert!(decode.is_new);
    }

    #[tokio::test(start_paused = true)]
    async fn qso_logged_events_reach_subscribers() {
        let f = spawn_router();
        let mut qsos = f.wsjtx.subscribe_qsos_logged();
        let env: Envelope = serde_json::from_value(json!({
            "wsjtx": {"type": "QsoLoggedMessage", "payload": {
                "comments": "",
                "dateTimeOff": "2021-11-07T18:34:00Z",
                "dateTimeOn": "2021-11-07T18:30:30Z",
                "dxCall": "W1AW",
                "dxGrid": "FN31",
                "exchangeReceived": "",
                "exchangeSent": "",
                "mode": "FT8",
                "myCall": "K0TEST",
                "myGrid": "EN35",
                "name": "",
                "operatorCall": "",
                "reportReceived": "-10",
                "reportSent": "-05",
                "txFrequency": 14_074_000u64,
                "txPower": "25",
                "id": "WSJT-X",
                "propagationMode": ""
            }}
        }))
        .unwrap();
        f.frames.send(env).await.unwrap();

        let qso = qsos.recv().await.unwrap();
        assert_eq!(qso.dx_call, "W1AW");
        assert_eq!(qso.mode, "FT8");
    }

    #[tokio::test(start_paused = true)]
    async fn logged_adif_events_reach_subscribers() {
        let f = spawn_router();
        let mut adif = f.wsjtx.subscribe_logged_adif();
        let env: Envelope = serde_json::from_value(json!({
            "wsjtx": {"type": "LoggedAdifMessage", "payload": {
                "id": "WSJT-X",
                "adif": "<call:4>W1AW <eor>"
            }}
        }))
        .unwrap();
        f.frames.send(env).await.unwrap();

        assert_eq!(adif.recv().await.unwrap().adif, "<call:4>W1AW <eor>");
    }

    #[tokio::test(start_paused = true)]
    async fn wspr_decode_events_reach_subscribers() {
        let f = spawn_router();
        let mut wspr = f.wsjtx.subscribe_wspr_decodes();
        let env: Envelope = serde_json::from_value(json!({
            "wsjtx": {"type": "WSPRDecodeMessage", "payload": {
                "id": "WSJT-X",
                "new": true,
                "time": 0,
                "snr": -28,
                "deltaTime": -0.2,
                "frequency": 14_097_050u64,
                "drift": -1,
                "callsign": "W1AW",
                "grid": "FN31",
                "power": 37,
                "offAir": false
            }}
        }))
        .unwrap();
        f.frames.send(env).await.unwrap();

        let decode = wspr.recv().await.unwrap();
        assert_eq!(decode.callsign, "W1AW");
        assert_eq!(decode.drift, -1);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_command_echo_round_trip() {
        let mut f = spawn_router();
        let mut clears = f.wsjtx.subscribe_clears();

        f.wsjtx.clear(ClearWindow::Both);
        let env = f.outbound.recv().await.unwrap();
        assert_eq!(env.wsjtx.as_ref().unwrap().kind, "ClearMessage");

        // Feed the command back as if the application echoed it.
        f.frames.send(env).await.unwrap();
        let clear = clears.recv().await.unwrap();
        assert_eq!(clear.window, Some(2));
        assert_eq!(clear.id, "WSJT-X");
    }
}
