//! Failure taxonomy for settings loading.

use thiserror::Error;

/// Why a settings layer could not be applied.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but reading it failed.
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// The file's text is not JSON, or a field has the wrong shape.
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A value parsed but lies outside what the bridge accepts.
    #[error("unusable settings value: {0}")]
    InvalidValue(String),
}

/// Shorthand for fallible settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_settings_from_path, parse_port};

    #[test]
    fn reading_a_directory_reports_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings_from_path(dir.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
        assert!(err.to_string().starts_with("could not read settings file"));
    }

    #[test]
    fn truncated_settings_file_reports_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"port":"#).unwrap();
        let err = load_settings_from_path(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
        assert!(err.to_string().starts_with("settings file is not valid JSON"));
    }

    #[test]
    fn rejected_port_override_names_the_value() {
        let err = parse_port("70000").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue(_)));
        assert_eq!(
            err.to_string(),
            "unusable settings value: port \"70000\" is outside 1..=65535"
        );
    }
}
