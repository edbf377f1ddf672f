//! Core domain for the Régie mission-order toolkit.
//!
//! This crate owns the two state machines the application is built around:
//! the session lifecycle (sign-in, inactivity lock, cross-tab logout
//! propagation) and the ordered roster selection with its derived section
//! partition. Everything that touches the outside world goes through the
//! [`store::LocalStore`] and [`auth::AuthProvider`] seams; concrete adapters
//! live in `regie-infrastructure`.

pub mod auth;
pub mod directory;
pub mod error;
pub mod history;
pub mod mission;
pub mod roster;
pub mod settings;
pub mod store;

// Re-export common error type
pub use error::{RegieError, Result};
