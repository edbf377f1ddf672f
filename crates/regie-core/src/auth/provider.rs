//! Auth provider seam.
//!
//! Defines the interface to the opaque remote identity service. The manager
//! never sees tokens beyond carrying them around; concrete providers live in
//! `regie-infrastructure`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::error::AuthError;

/// The authenticated identity as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Opaque user id assigned by the identity service
    pub id: String,
    /// The email the user authenticated with
    pub email: String,
}

/// An opaque credential bundle for an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// What kind of change the provider observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// A provider-side session change notification.
///
/// Delivered one at a time, in arrival order; the session lifecycle manager
/// applies each atomically.
#[derive(Debug, Clone)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub session: Option<AuthSession>,
}

/// Scope of a sign-out request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutScope {
    /// Revoke every session of the identity, across devices.
    Global,
    /// End only this client's session.
    Local,
}

/// An abstract remote identity service.
///
/// All operations can fail with credential or transport errors; failures are
/// returned as [`AuthError`] values, never panics. Implementations should
/// broadcast an [`AuthChange`] after any call that alters the session.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the provider's current session, if one is established.
    async fn get_session(&self) -> Option<AuthSession>;

    /// Authenticates with an email/password pair.
    ///
    /// # Returns
    ///
    /// - `Ok(session)`: Credentials accepted
    /// - `Err(AuthError::Credentials(_))`: Credentials rejected
    /// - `Err(AuthError::Transport(_))`: Service unreachable
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Registers a new account.
    ///
    /// Does not authenticate: the service may require email confirmation
    /// before the first sign-in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Ends the current session with the given scope.
    async fn sign_out(&self, scope: SignOutScope) -> Result<(), AuthError>;

    /// Subscribes to session change notifications.
    fn subscribe(&self) -> broadcast::Receiver<AuthChange>;
}
