//! Session lifecycle and access-control domain module.
//!
//! This module owns the decision of what the application may show at any
//! instant: a sign-in form, a lock screen, or the protected content - and
//! keeps that decision consistent across execution contexts (browser tabs)
//! through the shared persistent store.
//!
//! # Module Structure
//!
//! - `error`: Structured auth errors returned as values (`AuthError`)
//! - `provider`: The opaque remote identity service seam (`AuthProvider`)
//! - `event`: Observable session state (`SessionPhase`, `SessionEvent`)
//! - `manager`: The lifecycle state machine (`SessionManager`)

mod error;
mod event;
mod manager;
mod provider;

pub use error::AuthError;
pub use event::{SessionEvent, SessionPhase, SessionSnapshot};
pub use manager::{LifecycleConfig, SessionManager};
pub use provider::{AuthChange, AuthEvent, AuthProvider, AuthSession, AuthUser, SignOutScope};
