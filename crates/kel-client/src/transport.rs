//! Persistent WebSocket transport to the agent.
//!
//! One task owns the socket for its whole life. It dials on request,
//! forwards inbound frames to the router, writes outbound commands, and
//! redials on a fixed delay after any drop. Commands sent while no socket
//! is open are dropped, never queued.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use kel_core::Envelope;
use metrics::counter;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::error::Result;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Control messages accepted by the transport task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Control {
    /// Dial the given agent, replacing any current connection.
    Connect { host: String, port: u16 },
}

/// Channel ends owned by the transport task.
pub(crate) struct TransportTask {
    pub(crate) ctl: mpsc::Receiver<Control>,
    pub(crate) outbound: mpsc::Receiver<Envelope>,
    pub(crate) frames: mpsc::Sender<Envelope>,
    pub(crate) connected: watch::Sender<bool>,
    pub(crate) reconnect_delay: Duration,
    pub(crate) cancel: CancellationToken,
}

/// Local agents speak plain `ws`, anything remote goes through TLS.
fn agent_url(host: &str, port: u16) -> String {
    let scheme = if host == "localhost" { "ws" } else { "wss" };
    format!("{scheme}://{host}:{port}/websocket")
}

fn set_connected(connected: &watch::Sender<bool>, up: bool) {
    if *connected.borrow() != up {
        let _ = connected.send_replace(up);
    }
}

/// An explicit connect request flips the connected flag up front; a failed
/// attempt or dropped socket corrects it.
fn note_connect_request(task: &TransportTask, host: &str, port: u16) {
    counter!("agent_connects_total").increment(1);
    info!(%host, port, "agent connect requested");
    set_connected(&task.connected, true);
}

fn drop_command(reason: &'static str) {
    counter!("agent_commands_dropped_total").increment(1);
    trace!(reason, "command dropped");
}

async fn open_socket(url: &str) -> Result<WsStream> {
    let (ws, _response) = connect_async(url).await?;
    Ok(ws)
}

pub(crate) async fn run_transport(mut task: TransportTask) {
    let Some((mut host, mut port)) = wait_for_target(&mut task).await else {
        return;
    };

    loop {
        let url = agent_url(&host, port);
        debug!(%url, "connecting to agent");

        let attempt = tokio::select! {
            res = open_socket(&url) => res,
            ctl = task.ctl.recv() => match ctl {
                Some(Control::Connect { host: h, port: p }) => {
                    note_connect_request(&task, &h, p);
                    (host, port) = (h, p);
                    continue;
                }
                None => return,
            },
            () = task.cancel.cancelled() => return,
        };

        match attempt {
            Ok(ws) => {
                info!(%url, "agent connection open");
                drain_stale_commands(&mut task.outbound);
                match run_socket(&mut task, ws).await {
                    SocketEnd::Dropped => {}
                    SocketEnd::Retarget { host: h, port: p } => {
                        (host, port) = (h, p);
                        continue;
                    }
                    SocketEnd::Cancelled => return,
                }
            }
            Err(e) => warn!(%url, error = %e, "agent connection failed"),
        }

        set_connected(&task.connected, false);
        match wait_reconnect(&mut task).await {
            DelayEnd::Elapsed => {
                counter!("agent_reconnects_total").increment(1);
            }
            DelayEnd::Retarget { host: h, port: p } => (host, port) = (h, p),
            DelayEnd::Closed | DelayEnd::Cancelled => return,
        }
    }
}

/// Idle until the first connect request arrives. Commands received here
/// have no socket to go to and are dropped.
async fn wait_for_target(task: &mut TransportTask) -> Option<(String, u16)> {
    loop {
        tokio::select! {
            ctl = task.ctl.recv() => match ctl {
                Some(Control::Connect { host, port }) => {
                    note_connect_request(task, &host, port);
                    return Some((host, port));
                }
                None => return None,
            },
            env = task.outbound.recv() => {
                if env.is_none() {
                    return None;
                }
                drop_command("no connection");
            }
            () = task.cancel.cancelled() => return None,
        }
    }
}

/// Commands that queued up while the dial was in flight predate the
/// connection, so they are dropped rather than replayed.
fn drain_stale_commands(outbound: &mut mpsc::Receiver<Envelope>) {
    while outbound.try_recv().is_ok() {
        drop_command("sent before socket open");
    }
}

enum SocketEnd {
    Dropped,
    Retarget { host: String, port: u16 },
    Cancelled,
}

async fn run_socket(task: &mut TransportTask, ws: WsStream) -> SocketEnd {
    let (mut sink, mut stream) = ws.split();

    loop {
        tokio::select! {
            msg = stream.next() => {
                let Some(Ok(msg)) = msg else {
                    warn!("agent connection dropped");
                    return SocketEnd::Dropped;
                };
                let Message::Text(text) = msg else { continue };
                set_connected(&task.connected, true);
                match serde_json::from_str::<Envelope>(&text) {
                    Ok(envelope) => {
                        if task.frames.send(envelope).await.is_err() {
                            return SocketEnd::Cancelled;
                        }
                    }
                    Err(e) => {
                        counter!("agent_malformed_frames_total").increment(1);
                        debug!(error = %e, "dropping malformed frame");
                    }
                }
            }
            env = task.outbound.recv() => {
                let Some(envelope) = env else {
                    return SocketEnd::Cancelled;
                };
                match serde_json::to_string(&envelope) {
                    Ok(json) => {
                        if sink.send(Message::Text(json.into())).await.is_err() {
                            warn!("agent connection dropped while sending");
                            return SocketEnd::Dropped;
                        }
                    }
                    Err(e) => warn!(error = %e, "failed to encode outbound frame"),
                }
            }
            ctl = task.ctl.recv() => match ctl {
                Some(Control::Connect { host, port }) => {
                    note_connect_request(task, &host, port);
                    return SocketEnd::Retarget { host, port };
                }
                None => return SocketEnd::Cancelled,
            },
            () = task.cancel.cancelled() => {
                let _ = sink.send(Message::Close(None)).await;
                return SocketEnd::Cancelled;
            }
        }
    }
}

enum DelayEnd {
    Elapsed,
    Retarget { host: String, port: u16 },
    Closed,
    Cancelled,
}

/// Fixed-delay backoff between attempts. A retarget during the wait skips
/// the rest of the delay.
async fn wait_reconnect(task: &mut TransportTask) -> DelayEnd {
    let deadline = Instant::now() + task.reconnect_delay;
    loop {
        tokio::select! {
            () = sleep_until(deadline) => return DelayEnd::Elapsed,
            ctl = task.ctl.recv() => match ctl {
                Some(Control::Connect { host, port }) => {
                    note_connect_request(task, &host, port);
                    return DelayEnd::Retarget { host, port };
                }
                None => return DelayEnd::Closed,
            },
            env = task.outbound.recv() => {
                if env.is_none() {
                    return DelayEnd::Closed;
                }
                drop_command("no connection");
            }
            () = task.cancel.cancelled() => return DelayEnd::Cancelled,
        }
    }
}
