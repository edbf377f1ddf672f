//! Render gating.
//!
//! Maps the session snapshot to the single screen the presentation layer
//! may show. `Splash` gates everything until the first session resolution
//! completes; a locked session always gets the password-only re-entry
//! screen with the remembered email on it.

use regie_core::auth::{SessionPhase, SessionSnapshot};

/// What the application shell should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Initial session fetch still pending.
    Splash,
    /// Full sign-in / sign-up form.
    SignIn,
    /// Password-only re-entry with the remembered email and a full
    /// sign-out option.
    LockScreen { email: String },
    /// The protected mission-order workspace.
    Workspace,
}

/// The screen for a session snapshot. Total: every phase maps to exactly
/// one screen, so the UI is never indeterminate.
pub fn screen_for(snapshot: &SessionSnapshot) -> Screen {
    match snapshot.phase {
        SessionPhase::Loading => Screen::Splash,
        SessionPhase::Unauthenticated => Screen::SignIn,
        SessionPhase::Locked => Screen::LockScreen {
            email: snapshot.remembered_email.clone(),
        },
        SessionPhase::Unlocked => Screen::Workspace,
    }
}
