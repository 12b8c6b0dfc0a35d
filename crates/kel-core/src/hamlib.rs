//! Typed payload records for the Hamlib bridge.

use serde::{Deserialize, Serialize};

/// Snapshot of the transceiver's current VFO state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HamlibRigState {
    /// Transceiver model name.
    pub model: String,
    /// Dial frequency of the current VFO in hertz.
    pub frequency: u64,
    /// Mode name of the current VFO.
    pub mode: String,
    /// Width of the current passband filter in hertz.
    pub passband_width_hz: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rig_state_fields_are_camel_case() {
        let state: HamlibRigState = serde_json::from_value(json!({
            "model": "IC-7300",
            "frequency": 14_074_000u64,
            "mode": "USB",
            "passbandWidthHz": 2700
        }))
        .unwrap();
        assert_eq!(state.model, "IC-7300");
        assert_eq!(state.passband_width_hz, 2700);
    }

    #[test]
    fn rig_state_has_no_id_field() {
        let state = HamlibRigState {
            model: "Dummy".to_owned(),
            frequency: 7_074_000,
            mode: "LSB".to_owned(),
            passband_width_hz: 2400,
        };
        let value = serde_json::to_value(&state).unwrap();
        assert!(value.get("id").is_none());
    }
}
