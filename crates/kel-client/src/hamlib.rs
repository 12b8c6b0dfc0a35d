//! Client-facing Hamlib handle.

use kel_core::HamlibRigState;
use tokio::sync::watch;

/// Access to the Hamlib side of the bridge.
///
/// Receive-only: the rig schema carries no addressable client id, so
/// there is no command direction. Cheap to clone.
#[derive(Clone)]
pub struct HamlibHandle {
    pub(crate) liveness: watch::Receiver<bool>,
    pub(crate) rig_state: watch::Receiver<Option<HamlibRigState>>,
}

impl HamlibHandle {
    /// Watch for protocol up/down transitions.
    #[must_use]
    pub fn liveness(&self) -> watch::Receiver<bool> {
        self.liveness.clone()
    }

    /// Whether the protocol is currently up.
    #[must_use]
    pub fn is_live(&self) -> bool {
        *self.liveness.borrow()
    }

    /// Latest rig state, or `None` while the protocol is down.
    #[must_use]
    pub fn rig_state(&self) -> Option<HamlibRigState> {
        self.rig_state.borrow().clone()
    }

    /// Watch rig state snapshots as they change.
    #[must_use]
    pub fn watch_rig_state(&self) -> watch::Receiver<Option<HamlibRigState>> {
        self.rig_state.clone()
    }
}
