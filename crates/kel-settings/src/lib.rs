//! # kel-settings
//!
//! Layered host/port configuration for the kel-agent bridge.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`Settings::default()`] (`localhost:8081`)
//! 2. **User file**: `~/.kel/settings.json` (merged over defaults)
//! 3. **Environment variables**: `KEL_AGENT_HOST` / `KEL_AGENT_PORT`
//!
//! The global singleton is reloadable: after writing new values to disk,
//! [`reload_settings_from_path`] swaps the cached value so all subsequent
//! [`get_settings`] calls return fresh data.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{load_settings, load_settings_from_path, settings_path};
pub use types::{DEFAULT_AGENT_HOST, DEFAULT_AGENT_PORT, Settings};

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

/// Global settings singleton.
///
/// `RwLock<Option<Arc<Settings>>>` rather than `OnceLock` so the cached
/// value can be swapped on reload. Reads are cheap (shared lock +
/// `Arc::clone`); writes only happen on reload.
static SETTINGS: RwLock<Option<Arc<Settings>>> = RwLock::new(None);

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.kel/settings.json` with env var
/// overrides. On subsequent calls, returns the cached value. If loading
/// fails, returns compiled defaults.
///
/// Returns an `Arc` so callers hold a consistent snapshot even if another
/// thread reloads settings concurrently.
pub fn get_settings() -> Arc<Settings> {
    // Fast path: read lock
    {
        let guard = SETTINGS.read();
        if let Some(ref s) = *guard {
            return Arc::clone(s);
        }
    }

    // Slow path: first access, take write lock
    let mut guard = SETTINGS.write();
    // Double-check after acquiring write lock (another thread may have initialized)
    if let Some(ref s) = *guard {
        return Arc::clone(s);
    }

    let settings = Arc::new(match load_settings() {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            Settings::default()
        }
    });
    *guard = Some(Arc::clone(&settings));
    settings
}

/// Initialize the global settings with a specific value.
///
/// Replaces any previously cached settings. Useful for tests and binaries
/// that resolve the endpoint from flags.
pub fn init_settings(settings: Settings) {
    let mut guard = SETTINGS.write();
    *guard = Some(Arc::new(settings));
}

/// Reload settings from a specific file path.
///
/// Reads the file, merges over defaults, applies env overrides, and swaps
/// the global cache. All subsequent [`get_settings`] calls return the new
/// values.
pub fn reload_settings_from_path(path: &Path) {
    let new = Arc::new(match load_settings_from_path(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, ?path, "failed to reload settings, falling back to defaults");
            Settings::default()
        }
    });
    let mut guard = SETTINGS.write();
    *guard = Some(new);
    tracing::info!(?path, "settings reloaded from disk");
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that mutate the global SETTINGS static must hold this lock
    /// to avoid racing with each other (tests run in parallel threads).
    static SETTINGS_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

    #[test]
    fn init_then_get_returns_same_value() {
        let _guard = SETTINGS_MUTEX.lock().unwrap();
        init_settings(Settings {
            host: "radio.local".to_owned(),
            port: 9000,
        });
        let settings = get_settings();
        assert_eq!(settings.host, "radio.local");
        assert_eq!(settings.port, 9000);
    }

    #[test]
    fn reload_swaps_cached_value() {
        let _guard = SETTINGS_MUTEX.lock().unwrap();
        init_settings(Settings {
            host: "before.local".to_owned(),
            port: 1111,
        });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"host": "after.local", "port": 2222}"#).unwrap();
        reload_settings_from_path(&path);

        let settings = get_settings();
        assert_eq!(settings.host, "after.local");
        assert_eq!(settings.port, 2222);
    }

    #[test]
    fn reload_with_bad_file_falls_back_to_defaults() {
        let _guard = SETTINGS_MUTEX.lock().unwrap();
        init_settings(Settings {
            host: "before.local".to_owned(),
            port: 1111,
        });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{broken").unwrap();
        reload_settings_from_path(&path);

        assert_eq!(*get_settings(), Settings::default());
    }

    #[test]
    fn re_exports_work() {
        let _settings = Settings::default();
        let _path = settings_path();
        assert_eq!(DEFAULT_AGENT_HOST, "localhost");
        assert_eq!(DEFAULT_AGENT_PORT, 8081);
    }
}
