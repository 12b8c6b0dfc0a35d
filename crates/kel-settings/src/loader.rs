//! Assembles [`Settings`] from its three layers.
//!
//! Compiled defaults come first, then whatever fields
//! `~/.kel/settings.json` carries, then the `KEL_AGENT_*` environment
//! variables. Later layers win field by field: a missing or `null` file
//! field leaves the layer below in place, and an environment override
//! that fails validation is logged and skipped.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::{Result, SettingsError};
use crate::types::Settings;

const HOST_VAR: &str = "KEL_AGENT_HOST";
const PORT_VAR: &str = "KEL_AGENT_PORT";

/// The user's settings file: `~/.kel/settings.json`, with `/tmp`
/// standing in for the home directory when `$HOME` is unset.
pub fn settings_path() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => Path::new(&home).join(".kel/settings.json"),
        Err(_) => PathBuf::from("/tmp/.kel/settings.json"),
    }
}

/// Settings from the default file location plus environment overrides.
pub fn load_settings() -> Result<Settings> {
    load_settings_from_path(&settings_path())
}

/// Settings from a specific file plus environment overrides.
///
/// A missing file is not an error; the defaults flow through. A file
/// that exists but cannot be read or parsed is.
pub fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let mut settings = Settings::default();
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let file: FileSettings = serde_json::from_str(&text)?;
            debug!(?path, "read settings file");
            file.overlay(&mut settings);
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(?path, "no settings file, keeping defaults");
        }
        Err(e) => return Err(e.into()),
    }
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// The fields a settings file may carry. Each is optional so a file can
/// pin one value and leave the rest to the layers below; `null` counts
/// as absent.
#[derive(Debug, Deserialize)]
struct FileSettings {
    host: Option<String>,
    port: Option<u16>,
}

impl FileSettings {
    fn overlay(self, settings: &mut Settings) {
        if let Some(host) = self.host {
            settings.host = host;
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
    }
}

// ── Environment overrides ───────────────────────────────────────────────────

/// Overlay `KEL_AGENT_HOST` / `KEL_AGENT_PORT` from the process
/// environment onto `settings`.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides(
        settings,
        std::env::var(HOST_VAR).ok(),
        std::env::var(PORT_VAR).ok(),
    );
}

fn apply_overrides(settings: &mut Settings, host: Option<String>, port: Option<String>) {
    if let Some(host) = host.filter(|h| !h.is_empty()) {
        settings.host = host;
    }
    let Some(raw) = port else { return };
    match parse_port(&raw) {
        Ok(port) => settings.port = port,
        Err(e) => warn!(key = PORT_VAR, error = %e, "ignoring environment override"),
    }
}

/// A port override must be a number in 1..=65535.
pub(crate) fn parse_port(raw: &str) -> Result<u16> {
    match raw.parse::<u16>() {
        Ok(port) if port >= 1 => Ok(port),
        _ => Err(SettingsError::InvalidValue(format!(
            "port {raw:?} is outside 1..=65535"
        ))),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
