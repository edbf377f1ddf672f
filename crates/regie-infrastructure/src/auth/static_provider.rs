//! In-process auth provider for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use regie_core::auth::{
    AuthChange, AuthError, AuthEvent, AuthProvider, AuthSession, AuthUser, SignOutScope,
};
use tokio::sync::{Mutex, broadcast};
use uuid::Uuid;

struct Account {
    password: String,
    confirmed: bool,
}

/// A provider backed by a fixed in-memory account table.
///
/// Matches the remote service's observable behavior: sign-up registers an
/// unconfirmed account that cannot sign in until [`confirm`] is called, and
/// every session change is broadcast to subscribers.
///
/// [`confirm`]: StaticAuthProvider::confirm
#[derive(Clone)]
pub struct StaticAuthProvider {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    session: Arc<Mutex<Option<AuthSession>>>,
    changes: broadcast::Sender<AuthChange>,
}

impl StaticAuthProvider {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            session: Arc::new(Mutex::new(None)),
            changes,
        }
    }

    /// A provider pre-seeded with one confirmed account.
    pub async fn with_account(email: &str, password: &str) -> Self {
        let provider = Self::new();
        provider.accounts.lock().await.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                confirmed: true,
            },
        );
        provider
    }

    /// Marks a registered address as confirmed, standing in for the email
    /// confirmation round trip.
    pub async fn confirm(&self, email: &str) {
        if let Some(account) = self.accounts.lock().await.get_mut(email) {
            account.confirmed = true;
        }
    }

    fn session_for(email: &str) -> AuthSession {
        AuthSession {
            user: AuthUser {
                id: Uuid::new_v4().to_string(),
                email: email.to_string(),
            },
            access_token: Uuid::new_v4().to_string(),
            refresh_token: Some(Uuid::new_v4().to_string()),
        }
    }

    fn emit(&self, event: AuthEvent, session: Option<AuthSession>) {
        let _ = self.changes.send(AuthChange { event, session });
    }
}

impl Default for StaticAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn get_session(&self) -> Option<AuthSession> {
        self.session.lock().await.clone()
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        {
            let accounts = self.accounts.lock().await;
            match accounts.get(email) {
                Some(account) if account.password == password => {
                    if !account.confirmed {
                        return Err(AuthError::Credentials("Email not confirmed".to_string()));
                    }
                }
                _ => {
                    return Err(AuthError::Credentials(
                        "Invalid login credentials".to_string(),
                    ));
                }
            }
        }

        let session = Self::session_for(email);
        *self.session.lock().await = Some(session.clone());
        self.emit(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(email) {
            return Err(AuthError::Credentials("User already registered".to_string()));
        }
        accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                confirmed: false,
            },
        );
        Ok(())
    }

    async fn sign_out(&self, _scope: SignOutScope) -> Result<(), AuthError> {
        *self.session.lock().await = None;
        self.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.changes.subscribe()
    }
}
