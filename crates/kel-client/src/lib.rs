//! # kel-client
//!
//! One persistent WebSocket bridge to the local agent, multiplexing the
//! WSJT-X and Hamlib protocols over a single connection.
//!
//! [`KelClient::start`] spawns two tasks: a transport that owns the socket
//! and redials on a fixed delay after any drop, and a router that fans
//! inbound frames out onto typed per-protocol channels. [`WsjtxHandle`]
//! and [`HamlibHandle`] are the consumer surface; both are cheap clones
//! backed by the same bridge.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod hamlib;
mod router;
mod transport;
pub mod wsjtx;

pub use config::{ClientConfig, RECONNECT_DELAY, SILENCE_TIMEOUT};
pub use error::{ClientError, Result};
pub use hamlib::HamlibHandle;
pub use wsjtx::{ClearWindow, ConfigureParams, DEFAULT_WSJTX_ID, WsjtxHandle};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::router::{HamlibChannel, RouterTask, WsjtxChannel, run_router};
use crate::transport::{Control, TransportTask, run_transport};

/// Handle to a running bridge.
///
/// Dropping it tears the bridge down; [`KelClient::shutdown`] does the
/// same but waits for the tasks to finish and closes the socket cleanly.
pub struct KelClient {
    connected: watch::Receiver<bool>,
    wsjtx: WsjtxHandle,
    hamlib: HamlibHandle,
    ctl: mpsc::Sender<Control>,
    cancel: CancellationToken,
    transport: JoinHandle<()>,
    router: JoinHandle<()>,
}

impl KelClient {
    /// Spawns the bridge tasks and dials the configured agent. Must be
    /// called from within a Tokio runtime.
    #[must_use]
    pub fn start(config: ClientConfig) -> Self {
        let (ctl_tx, ctl_rx) = mpsc::channel(8);
        let (outbound_tx, outbound_rx) = mpsc::channel(64);
        let (frame_tx, frame_rx) = mpsc::channel(64);
        let (connected_tx, connected_rx) = watch::channel(false);
        let cancel = CancellationToken::new();

        let (wsjtx_channel, wsjtx) = WsjtxChannel::new(config.event_capacity, outbound_tx);
        let (hamlib_channel, hamlib) = HamlibChannel::new();

        let transport = tokio::spawn(run_transport(TransportTask {
            ctl: ctl_rx,
            outbound: outbound_rx,
            frames: frame_tx,
            connected: connected_tx,
            reconnect_delay: config.reconnect_delay,
            cancel: cancel.clone(),
        }));
        let router = tokio::spawn(run_router(RouterTask {
            frames: frame_rx,
            wsjtx: wsjtx_channel,
            hamlib: hamlib_channel,
            silence_timeout: config.silence_timeout,
            cancel: cancel.clone(),
        }));

        let client = Self {
            connected: connected_rx,
            wsjtx,
            hamlib,
            ctl: ctl_tx,
            cancel,
            transport,
            router,
        };
        client.connect(&config.host, config.port);
        client
    }

    /// Dial a different agent, replacing any current connection.
    pub fn connect(&self, host: &str, port: u16) {
        let msg = Control::Connect {
            host: host.to_owned(),
            port,
        };
        if self.ctl.try_send(msg).is_err() {
            warn!(%host, port, "connect request dropped");
        }
    }

    /// Watch the transport's connected flag. Optimistically true while a
    /// requested dial is in flight; corrected when the dial fails.
    #[must_use]
    pub fn connected(&self) -> watch::Receiver<bool> {
        self.connected.clone()
    }

    /// Whether the transport currently believes it is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        *self.connected.borrow()
    }

    /// Handle for the WSJT-X protocol.
    #[must_use]
    pub fn wsjtx(&self) -> WsjtxHandle {
        self.wsjtx.clone()
    }

    /// Handle for the Hamlib protocol.
    #[must_use]
    pub fn hamlib(&self) -> HamlibHandle {
        self.hamlib.clone()
    }

    /// Closes the connection and waits for both bridge tasks to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.transport.await;
        let _ = self.router.await;
    }
}
