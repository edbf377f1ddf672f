//! Structured authentication errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by session lifecycle operations.
///
/// These are always returned as values - the manager never panics or throws
/// across its public boundary, so the presentation layer can surface the
/// message inline. The manager performs no retries; retry policy, if any,
/// belongs to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthError {
    /// The identity service rejected the credentials (bad password, unknown
    /// email, unconfirmed account). Never retried automatically.
    #[error("{0}")]
    Credentials(String),

    /// The identity service could not be reached.
    #[error("Connection error: {0}")]
    Transport(String),

    /// Unlock was attempted with no remembered email in memory or in the
    /// persistent store. Reported without contacting the identity service.
    #[error("No remembered email for this session")]
    MissingEmail,
}

impl AuthError {
    /// Check if this is a local validation error
    pub fn is_local(&self) -> bool {
        matches!(self, Self::MissingEmail)
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
