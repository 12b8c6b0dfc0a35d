//! # kel-core
//!
//! Wire model for the kel-agent WebSocket bridge: the outer envelope, the
//! per-protocol message kind discriminants, typed payload records for
//! every kind, and the pure decode-formatting helpers.
//!
//! Nothing here does I/O. `kel-client` owns the socket and the stream
//! plumbing; this crate only defines what travels over it.

#![deny(unsafe_code)]

pub mod envelope;
pub mod format;
pub mod hamlib;
pub mod kind;
pub mod wsjtx;

pub use envelope::{Envelope, ProtocolFrame};
pub use format::{format_decode, format_time};
pub use hamlib::HamlibRigState;
pub use kind::{ALL_HAMLIB_KINDS, ALL_WSJTX_KINDS, HamlibKind, WsjtxKind};
pub use wsjtx::*;
