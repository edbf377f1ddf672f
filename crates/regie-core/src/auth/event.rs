//! Observable session state.

use serde::{Deserialize, Serialize};

use super::provider::AuthUser;

/// The four phases of the session lifecycle.
///
/// Every rendering decision derives from the current phase: `Loading` gates
/// everything until the first session resolution completes, `Locked` renders
/// the password-only re-entry screen, `Unauthenticated` the full sign-in
/// form, and `Unlocked` the protected content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Initial session fetch has not resolved yet.
    Loading,
    /// No authenticated user.
    Unauthenticated,
    /// Authenticated and active.
    Unlocked,
    /// Authenticated but locked after inactivity; password required.
    Locked,
}

/// A read-only view of the session state for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub user: Option<AuthUser>,
    /// Ground truth for the unlock flow; survives sign-out via the store.
    pub remembered_email: String,
}

/// Events broadcast by the session lifecycle manager.
///
/// `ReloadRequired` asks the host to restart the application shell; the
/// manager itself never reloads anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The inactivity window is about to expire. At most once per timer cycle.
    LockWarning,
    Locked,
    Unlocked,
    SignedIn,
    SignedOut,
    ReloadRequired,
}
