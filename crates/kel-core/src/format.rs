//! Pure decode-formatting helpers.
//!
//! Renders decodes the same way the application's Band Activity and Rx
//! Frequency windows display them, so a bridge consumer can show familiar
//! lines without owning any protocol state.

use crate::wsjtx::WsjtxDecode;

/// Render a decode as `HHMMSS SNR ΔT ΔF ~  MESSAGE`.
///
/// SNR is right-justified to width 3, the time delta carries exactly one
/// decimal digit right-justified to width 4, the frequency delta is an
/// integer right-justified to width 4, then a literal `~`, two spaces, and
/// the message verbatim.
#[must_use]
pub fn format_decode(decode: &WsjtxDecode) -> String {
    format!(
        "{} {:>3} {:>4.1} {:>4} ~  {}",
        format_time(decode.time),
        decode.snr,
        decode.delta_time,
        decode.delta_frequency,
        decode.message
    )
}

/// Format milliseconds since midnight UTC as zero-padded `HHMMSS`.
#[must_use]
pub fn format_time(ms_since_midnight: u32) -> String {
    let total_seconds = ms_since_midnight / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}{minutes:02}{seconds:02}")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
