//! REST auth provider.
//!
//! Talks to a password-grant identity service over HTTP:
//! `POST {base}/token?grant_type=password`, `POST {base}/signup`,
//! `POST {base}/logout?scope=...`. Rejections come back as
//! [`AuthError::Credentials`] carrying the server's message; anything that
//! keeps the service from answering is [`AuthError::Transport`].

use std::sync::Arc;

use async_trait::async_trait;
use regie_core::auth::{
    AuthChange, AuthError, AuthEvent, AuthProvider, AuthSession, AuthUser, SignOutScope,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, broadcast};

/// Provider backed by a remote identity service.
#[derive(Clone)]
pub struct RestAuthProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    session: Arc<Mutex<Option<AuthSession>>>,
    changes: broadcast::Sender<AuthChange>,
}

#[derive(Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: UserBody,
}

#[derive(Deserialize)]
struct UserBody {
    id: String,
    email: String,
}

/// The service reports errors under varying keys depending on the endpoint.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl RestAuthProvider {
    /// Creates a provider for the service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            session: Arc::new(Mutex::new(None)),
            changes,
        }
    }

    /// Attaches the project api key sent with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    fn request(&self, url: String) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(url);
        if let Some(key) = &self.api_key {
            builder = builder.header("apikey", key);
        }
        builder
    }

    async fn post_credentials(
        &self,
        url: String,
        email: &str,
        password: &str,
    ) -> Result<reqwest::Response, AuthError> {
        let response = self
            .request(url)
            .json(&CredentialsRequest { email, password })
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_http_error(status, body))
    }

    fn emit(&self, event: AuthEvent, session: Option<AuthSession>) {
        let _ = self.changes.send(AuthChange { event, session });
    }
}

/// 4xx statuses are rejections the user can act on; everything else means
/// the service itself is unwell.
fn map_http_error(status: StatusCode, body: String) -> AuthError {
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|e| e.error_description.or(e.msg).or(e.message))
        .unwrap_or(body);
    if status.is_client_error() {
        AuthError::Credentials(message)
    } else {
        AuthError::Transport(format!("{}: {}", status, message))
    }
}

#[async_trait]
impl AuthProvider for RestAuthProvider {
    async fn get_session(&self) -> Option<AuthSession> {
        self.session.lock().await.clone()
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let url = format!("{}/token?grant_type=password", self.base_url);
        let response = self.post_credentials(url, email, password).await?;

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Transport(format!("malformed token response: {}", e)))?;

        let session = AuthSession {
            user: AuthUser {
                id: token.user.id,
                email: token.user.email,
            },
            access_token: token.access_token,
            refresh_token: token.refresh_token,
        };

        *self.session.lock().await = Some(session.clone());
        self.emit(AuthEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let url = format!("{}/signup", self.base_url);
        self.post_credentials(url, email, password).await?;
        // No session: the service confirms the address before the first
        // sign-in
        Ok(())
    }

    async fn sign_out(&self, scope: SignOutScope) -> Result<(), AuthError> {
        let token = self.session.lock().await.clone();

        if let Some(session) = token {
            let scope_param = match scope {
                SignOutScope::Global => "global",
                SignOutScope::Local => "local",
            };
            let url = format!("{}/logout?scope={}", self.base_url, scope_param);
            let response = self
                .request(url)
                .bearer_auth(&session.access_token)
                .send()
                .await
                .map_err(|e| AuthError::Transport(e.to_string()))?;

            let status = response.status();
            // An already-expired token still counts as signed out
            if !status.is_success() && status != StatusCode::UNAUTHORIZED {
                let body = response.text().await.unwrap_or_default();
                return Err(map_http_error(status, body));
            }
        }

        *self.session.lock().await = None;
        self.emit(AuthEvent::SignedOut, None);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_credentials() {
        let err = map_http_error(
            StatusCode::BAD_REQUEST,
            r#"{"error_description": "Invalid login credentials"}"#.to_string(),
        );
        assert_eq!(
            err,
            AuthError::Credentials("Invalid login credentials".to_string())
        );
    }

    #[test]
    fn test_server_errors_map_to_transport() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, String::new());
        assert!(err.is_transport());
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::UNPROCESSABLE_ENTITY, "plain text".to_string());
        assert_eq!(err, AuthError::Credentials("plain text".to_string()));
    }

    #[test]
    fn test_alternate_error_keys() {
        let err = map_http_error(
            StatusCode::FORBIDDEN,
            r#"{"msg": "Email not confirmed"}"#.to_string(),
        );
        assert_eq!(err, AuthError::Credentials("Email not confirmed".to_string()));
    }
}
