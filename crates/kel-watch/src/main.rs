//! # kel-watch
//!
//! Console watcher for the kel-agent bridge. Prints decodes and logged
//! QSOs to stdout and reports channel transitions until interrupted.

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use kel_client::{ClientConfig, KelClient, WsjtxHandle};
use kel_core::format_decode;
use tokio::sync::broadcast::error::RecvError;

/// Console watcher for agent traffic.
#[derive(Parser, Debug)]
#[command(name = "kel-watch", about = "Watch agent traffic from the console")]
struct Cli {
    /// Agent host to connect to (overrides settings if specified).
    #[arg(long)]
    host: Option<String>,

    /// Agent port to connect to (overrides settings if specified).
    #[arg(long)]
    port: Option<u16>,

    /// Emit logs as JSON lines instead of compact text.
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    /// Resolve the endpoint: settings file first, flags win.
    fn client_config(&self) -> ClientConfig {
        let settings = kel_settings::get_settings();
        let mut config = ClientConfig::from_settings(&settings);
        if let Some(ref host) = self.host {
            config.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }
}

/// Initialize logging to stderr so stdout stays clean for decode output.
///
/// `RUST_LOG` takes precedence over the default level when set.
fn init_logging(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    // try_init is a no-op if a subscriber is already set
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}

/// Print a wsjtx liveness transition, with instance detail when known.
fn report_wsjtx(wsjtx: &WsjtxHandle, up: bool) {
    if !up {
        println!("-- wsjtx channel down");
        return;
    }
    if let Some(hb) = wsjtx.heartbeat() {
        println!("-- wsjtx {} up ({})", hb.id, hb.version);
    } else {
        println!("-- wsjtx channel up");
    }
}

/// Stream agent traffic to stdout until interrupted or the client stops.
async fn watch_loop(client: &KelClient) -> Result<()> {
    let wsjtx = client.wsjtx();
    let hamlib = client.hamlib();

    let mut decodes = wsjtx.subscribe_decodes();
    let mut clears = wsjtx.subscribe_clears();
    let mut qsos = wsjtx.subscribe_qsos_logged();
    let mut wsjtx_live = wsjtx.liveness();
    let mut hamlib_live = hamlib.liveness();
    let mut rig = hamlib.watch_rig_state();
    let mut connected = client.connected();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            decode = decodes.recv() => match decode {
                Ok(decode) => println!("{}", format_decode(&decode)),
                Err(RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "decode stream lagged");
                }
                Err(RecvError::Closed) => break,
            },
            clear = clears.recv() => match clear {
                Ok(clear) => match clear.window {
                    Some(0) => println!("-- band activity cleared"),
                    Some(1) => println!("-- rx frequency window cleared"),
                    _ => println!("-- decode windows cleared"),
                },
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            qso = qsos.recv() => match qso {
                Ok(qso) => println!(
                    "-- logged {} on {} at {} Hz",
                    qso.dx_call, qso.mode, qso.tx_frequency
                ),
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
            changed = wsjtx_live.changed() => {
                if changed.is_err() {
                    break;
                }
                let up = *wsjtx_live.borrow_and_update();
                report_wsjtx(&wsjtx, up);
            }
            changed = hamlib_live.changed() => {
                if changed.is_err() {
                    break;
                }
                let up = *hamlib_live.borrow_and_update();
                println!("-- rig channel {}", if up { "up" } else { "down" });
            }
            changed = rig.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rig.borrow_and_update().clone();
                if let Some(state) = state {
                    println!(
                        "-- rig {} at {} Hz {} ({} Hz wide)",
                        state.model, state.frequency, state.mode, state.passband_width_hz
                    );
                }
            }
            changed = connected.changed() => {
                if changed.is_err() {
                    break;
                }
                let up = *connected.borrow_and_update();
                println!("-- agent socket {}", if up { "connected" } else { "reconnecting" });
            }
            res = &mut ctrl_c => {
                res.context("failed to listen for ctrl-c")?;
                break;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_logging("info", args.log_json);

    let config = args.client_config();
    tracing::info!(host = %config.host, port = config.port, "starting agent watch");

    let client = KelClient::start(config);
    watch_loop(&client).await?;

    tracing::info!("shutting down");
    client.shutdown().await;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
