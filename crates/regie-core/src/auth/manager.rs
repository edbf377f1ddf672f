//! Session lifecycle management.
//!
//! `SessionManager` is the state machine deciding whether the application
//! shows a sign-in form, a lock screen, or the protected content, and it
//! keeps that decision consistent across tabs through the shared store.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock, broadcast};
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::store::{LocalStore, StoreChange, keys};

use super::error::AuthError;
use super::event::{SessionEvent, SessionPhase, SessionSnapshot};
use super::provider::{AuthChange, AuthEvent, AuthProvider, AuthSession, AuthUser, SignOutScope};

/// Fixed timing constants for the inactivity lock.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleConfig {
    /// Inactivity window after which the session locks.
    pub inactivity_timeout: Duration,
    /// How long before the lock the warning fires. Zero disables the warning.
    pub lock_warning_lead: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            // 3 hours, matching the production deployment
            inactivity_timeout: Duration::from_secs(3 * 60 * 60),
            lock_warning_lead: Duration::from_secs(5 * 60),
        }
    }
}

/// Mutable session state, guarded by a single lock so every transition
/// applies atomically.
#[derive(Debug, Default)]
struct SessionState {
    loading: bool,
    user: Option<AuthUser>,
    session: Option<AuthSession>,
    locked: bool,
    remembered_email: String,
    /// Suppresses repeat warnings until the timer is reset.
    warning_fired: bool,
}

impl SessionState {
    fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.user.is_none() {
            SessionPhase::Unauthenticated
        } else if self.locked {
            SessionPhase::Locked
        } else {
            SessionPhase::Unlocked
        }
    }
}

/// Manages the authenticated session and its liveness.
///
/// `SessionManager` is responsible for:
/// - Resolving the initial session on boot
/// - Applying provider-side auth changes as they arrive
/// - Locking the session after the inactivity window elapses
/// - Unlocking with the remembered email and a fresh password
/// - Propagating lock and forced-logout decisions across tabs via the store
///
/// All operations return errors as values; nothing panics across the public
/// boundary. The manager is cheap to clone - clones share all state.
#[derive(Clone)]
pub struct SessionManager {
    provider: Arc<dyn AuthProvider>,
    store: Arc<dyn LocalStore>,
    config: LifecycleConfig,
    state: Arc<RwLock<SessionState>>,
    /// Owned handle of the pending inactivity timer, replaced wholesale on
    /// every reset (cancel-before-replace, never two pending timers).
    timer: Arc<Mutex<Option<CancellationToken>>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    /// Creates a manager with the production timing constants.
    pub fn new(provider: Arc<dyn AuthProvider>, store: Arc<dyn LocalStore>) -> Self {
        Self::with_config(provider, store, LifecycleConfig::default())
    }

    /// Creates a manager with custom timing constants.
    pub fn with_config(
        provider: Arc<dyn AuthProvider>,
        store: Arc<dyn LocalStore>,
        config: LifecycleConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            provider,
            store,
            config,
            state: Arc::new(RwLock::new(SessionState {
                loading: true,
                ..SessionState::default()
            })),
            timer: Arc::new(Mutex::new(None)),
            events,
        }
    }

    /// Resolves the initial session and starts the background observers.
    ///
    /// Must be called exactly once before any other operation. Honors a
    /// pending forced-logout flag ("logout on next boot") before looking at
    /// the provider session, and resumes a persisted lock across reloads.
    ///
    /// # Errors
    ///
    /// Returns an error if the persistent store is unavailable.
    pub async fn bootstrap(&self) -> Result<()> {
        {
            let state = self.state.read().await;
            if !state.loading {
                tracing::warn!("bootstrap called twice, ignoring");
                return Ok(());
            }
        }

        if self.store.get(keys::FORCE_LOGOUT).await?.is_some() {
            tracing::debug!("honoring pending forced logout");
            if let Err(e) = self.provider.sign_out(SignOutScope::Global).await {
                tracing::warn!("forced sign-out failed: {}", e);
            }
            self.store.remove(keys::FORCE_LOGOUT).await?;
            self.store.remove(keys::SESSION_LOCKED).await?;
        }

        let initial = self.provider.get_session().await;
        let resume_locked = self.store.get(keys::SESSION_LOCKED).await?.is_some();

        match initial {
            Some(session) => {
                let email = session.user.email.clone();
                {
                    let mut state = self.state.write().await;
                    state.user = Some(session.user.clone());
                    state.session = Some(session);
                    state.remembered_email = email.clone();
                    state.locked = resume_locked;
                    state.loading = false;
                }
                self.store.set(keys::REMEMBERED_EMAIL, &email).await?;
                if !resume_locked {
                    self.restart_timer().await;
                }
            }
            None => {
                let stored = self.store.get(keys::REMEMBERED_EMAIL).await?;
                let mut state = self.state.write().await;
                if let Some(email) = stored {
                    state.remembered_email = email;
                }
                state.loading = false;
            }
        }

        self.spawn_auth_observer();
        self.spawn_store_observer();
        Ok(())
    }

    /// Authenticates with an email/password pair.
    ///
    /// On success the email is remembered (state and store), any lock is
    /// cleared and the inactivity timer (re)starts.
    pub async fn sign_in(&self, email: &str, password: &str) -> std::result::Result<(), AuthError> {
        let session = self.provider.sign_in_with_password(email, password).await?;

        self.cancel_timer().await;
        {
            let mut state = self.state.write().await;
            state.user = Some(session.user.clone());
            state.session = Some(session);
            state.remembered_email = email.to_string();
            state.locked = false;
            state.loading = false;
        }
        self.persist_best_effort(keys::REMEMBERED_EMAIL, Some(email))
            .await;
        self.persist_best_effort(keys::SESSION_LOCKED, None).await;
        self.restart_timer().await;
        self.emit(SessionEvent::SignedIn);
        Ok(())
    }

    /// Registers a new account.
    ///
    /// The provider may require email confirmation, so this neither
    /// authenticates nor touches the lock or the timer.
    pub async fn sign_up(&self, email: &str, password: &str) -> std::result::Result<(), AuthError> {
        self.provider.sign_up(email, password).await
    }

    /// Signs out of every session of this identity and resets local state.
    ///
    /// Always succeeds from the caller's point of view; provider failures are
    /// logged and swallowed. The remembered email is preserved in the store
    /// for the next reconnect prompt while being cleared from memory. Other
    /// tabs converge through the forced-logout flag.
    pub async fn sign_out(&self) {
        self.cancel_timer().await;

        let email = {
            let mut state = self.state.write().await;
            state.locked = false;
            state.user = None;
            state.session = None;
            std::mem::take(&mut state.remembered_email)
        };

        if !email.is_empty() {
            self.persist_best_effort(keys::REMEMBERED_EMAIL, Some(&email))
                .await;
        }
        self.persist_best_effort(keys::SESSION_LOCKED, None).await;
        self.persist_best_effort(keys::FORCE_LOGOUT, Some("1")).await;

        if let Err(e) = self.provider.sign_out(SignOutScope::Global).await {
            tracing::warn!("remote sign-out failed: {}", e);
        }

        self.emit(SessionEvent::SignedOut);
        self.emit(SessionEvent::ReloadRequired);
    }

    /// Re-authenticates a locked session with the remembered email.
    ///
    /// A missing remembered email (memory and store both empty) is a local
    /// validation error; the provider is not contacted. On success the local
    /// lock clears, the timer restarts, and the forced-logout flag is set so
    /// stale tabs re-validate on their next observation (explicit policy:
    /// prefer surfacing a fresh login over letting a stale unlocked tab
    /// linger).
    pub async fn unlock_session(&self, password: &str) -> std::result::Result<(), AuthError> {
        let mut email = self.state.read().await.remembered_email.clone();
        if email.is_empty() {
            email = self
                .store
                .get(keys::REMEMBERED_EMAIL)
                .await
                .ok()
                .flatten()
                .unwrap_or_default();
        }
        if email.is_empty() {
            return Err(AuthError::MissingEmail);
        }

        let session = self.provider.sign_in_with_password(&email, password).await?;

        self.cancel_timer().await;
        {
            let mut state = self.state.write().await;
            state.user = Some(session.user.clone());
            state.session = Some(session);
            state.remembered_email = email;
            state.locked = false;
        }
        self.persist_best_effort(keys::SESSION_LOCKED, None).await;
        self.persist_best_effort(keys::FORCE_LOGOUT, Some("1")).await;
        self.restart_timer().await;
        self.emit(SessionEvent::Unlocked);
        Ok(())
    }

    /// Locks the session. Idempotent; a session that was never authenticated
    /// cannot lock.
    ///
    /// The lock flag is persisted so a reload resumes locked, and so other
    /// tabs observe it and lock themselves.
    pub async fn lock_session(&self) {
        let transitioned = {
            let mut state = self.state.write().await;
            if state.user.is_none() || state.locked || state.loading {
                false
            } else {
                state.locked = true;
                true
            }
        };
        if !transitioned {
            return;
        }
        self.cancel_timer().await;
        self.persist_best_effort(keys::SESSION_LOCKED, Some("1")).await;
        self.emit(SessionEvent::Locked);
    }

    /// Records a user-activity signal (pointer, key, scroll, touch).
    ///
    /// Resets the inactivity timer while `Unlocked`; ignored in every other
    /// phase - a locked session must not re-extend itself from background
    /// activity.
    pub async fn record_activity(&self) {
        let unlocked = self.state.read().await.phase() == SessionPhase::Unlocked;
        if unlocked {
            self.restart_timer().await;
        }
    }

    /// Returns the current phase.
    pub async fn phase(&self) -> SessionPhase {
        self.state.read().await.phase()
    }

    /// Returns a read-only view of the session state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            phase: state.phase(),
            user: state.user.clone(),
            remembered_email: state.remembered_email.clone(),
        }
    }

    /// Returns the remembered email, if any.
    pub async fn remembered_email(&self) -> String {
        self.state.read().await.remembered_email.clone()
    }

    /// Subscribes to session events.
    pub fn events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Cancels the pending inactivity timer without touching the session.
    ///
    /// For host shells tearing the session view down without signing out; a
    /// stale firing must not outlive the view that armed it.
    pub async fn shutdown(&self) {
        self.cancel_timer().await;
    }

    // ------------------------------------------------------------------
    // Background observers
    // ------------------------------------------------------------------

    fn spawn_auth_observer(&self) {
        let manager = self.clone();
        let mut rx = self.provider.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(change) => manager.apply_auth_change(change).await,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("auth observer lagged by {} events", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }

    fn spawn_store_observer(&self) {
        let manager = self.clone();
        let mut rx = self.store.subscribe();
        tokio::spawn(async move {
            while let Some(change) = rx.recv().await {
                manager.apply_store_change(change).await;
            }
        });
    }

    /// Applies one provider-side change atomically. Timers are cancelled
    /// before the transition and recreated after, so a stale firing can
    /// never interleave with a partial update.
    async fn apply_auth_change(&self, change: AuthChange) {
        match (change.event, change.session) {
            (AuthEvent::SignedIn, Some(session)) => {
                self.cancel_timer().await;
                let email = session.user.email.clone();
                {
                    let mut state = self.state.write().await;
                    state.user = Some(session.user.clone());
                    state.session = Some(session);
                    state.remembered_email = email.clone();
                    state.locked = false;
                    state.loading = false;
                }
                self.persist_best_effort(keys::REMEMBERED_EMAIL, Some(&email))
                    .await;
                self.restart_timer().await;
            }
            (AuthEvent::TokenRefreshed, Some(session)) => {
                // Refresh carries new tokens only; a locked session stays
                // locked and the timer is untouched.
                let mut state = self.state.write().await;
                state.session = Some(session);
            }
            _ => {
                self.cancel_timer().await;
                {
                    let mut state = self.state.write().await;
                    state.user = None;
                    state.session = None;
                    state.locked = false;
                    state.loading = false;
                }
                let stored = self.store.get(keys::REMEMBERED_EMAIL).await.ok().flatten();
                if let Some(email) = stored {
                    self.state.write().await.remembered_email = email;
                }
            }
        }
    }

    /// Reacts to a sibling tab's store write. Reactions are idempotent, so
    /// every tab applying them independently is safe.
    async fn apply_store_change(&self, change: StoreChange) {
        match change.key.as_str() {
            keys::SESSION_LOCKED if change.value.is_some() => {
                tracing::debug!("lock flag set by another tab");
                let transitioned = {
                    let mut state = self.state.write().await;
                    if state.user.is_none() || state.locked {
                        false
                    } else {
                        state.locked = true;
                        true
                    }
                };
                if transitioned {
                    self.cancel_timer().await;
                    self.emit(SessionEvent::Locked);
                }
            }
            keys::FORCE_LOGOUT if change.value.is_some() => {
                tracing::debug!("forced logout observed");
                self.forced_logout().await;
            }
            _ => {}
        }
    }

    /// Idempotent local reaction to the forced-logout flag: end this tab's
    /// session and ask the host to reload. The flag itself stays in the
    /// store for tabs that are not currently running.
    async fn forced_logout(&self) {
        self.cancel_timer().await;
        let email = {
            let mut state = self.state.write().await;
            if state.user.is_none() {
                return;
            }
            state.user = None;
            state.session = None;
            state.locked = false;
            std::mem::take(&mut state.remembered_email)
        };
        if !email.is_empty() {
            self.persist_best_effort(keys::REMEMBERED_EMAIL, Some(&email))
                .await;
        }
        if let Err(e) = self.provider.sign_out(SignOutScope::Global).await {
            tracing::warn!("forced sign-out failed: {}", e);
        }
        self.emit(SessionEvent::SignedOut);
        self.emit(SessionEvent::ReloadRequired);
    }

    // ------------------------------------------------------------------
    // Inactivity timer
    // ------------------------------------------------------------------

    /// Replaces the pending timer with a fresh one. The previous timer is
    /// cancelled first; there is never more than one pending.
    async fn restart_timer(&self) {
        let token = CancellationToken::new();
        {
            let mut guard = self.timer.lock().await;
            if let Some(old) = guard.take() {
                old.cancel();
            }
            *guard = Some(token.clone());
        }
        self.state.write().await.warning_fired = false;

        let manager = self.clone();
        tokio::spawn(async move {
            let timeout = manager.config.inactivity_timeout;
            let lead = manager.config.lock_warning_lead.min(timeout);

            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(timeout - lead) => {}
            }
            if !lead.is_zero() {
                let fire = {
                    let mut state = manager.state.write().await;
                    if state.warning_fired {
                        false
                    } else {
                        state.warning_fired = true;
                        true
                    }
                };
                if fire {
                    manager.emit(SessionEvent::LockWarning);
                }
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(lead) => {}
                }
            }
            manager.lock_session().await;
        });
    }

    async fn cancel_timer(&self) {
        if let Some(token) = self.timer.lock().await.take() {
            token.cancel();
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    /// Store writes on the hot path are best-effort: a failing store is not
    /// a reason to fail a sign-in that the provider accepted.
    async fn persist_best_effort(&self, key: &str, value: Option<&str>) {
        let result = match value {
            Some(v) => self.store.set(key, v).await,
            None => self.store.remove(key).await,
        };
        if let Err(e) = result {
            tracing::warn!("store write for '{}' failed: {}", key, e);
        }
    }
}
