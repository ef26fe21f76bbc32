// src/integrations/identity/client.rs
//
// Password sign-in against the managed identity service
//
// ARCHITECTURE:
// - Maps the service's JSON into a `Session`
// - Never touches records or stores
// - Rejections become AppError::Auth; transport failures stay AppError::Http

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::HttpConfig;
use crate::error::{AppError, AppResult};

/// Email / password pair submitted from the admin login form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// An authenticated admin session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    /// Bearer token for document writes
    pub id_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Current session of one UI session, shared with clients that need the token
pub type SessionHandle = Arc<RwLock<Option<Session>>>;

pub fn new_session_handle() -> SessionHandle {
    Arc::new(RwLock::new(None))
}

/// Bearer token of the live session, if any
pub fn current_token(handle: &SessionHandle) -> Option<String> {
    handle
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|s| s.id_token.clone())
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> AppResult<Session>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: String,
    id_token: String,
    /// Seconds, sent as a string
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Identity REST client
pub struct PasswordAuthClient {
    base_url: String,
    api_key: Option<String>,
    http_client: Client,
}

impl PasswordAuthClient {
    pub fn new(base_url: &str, api_key: Option<String>, http: &HttpConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http_client,
        })
    }

    fn sign_in_url(&self) -> String {
        match &self.api_key {
            Some(key) => format!("{}/accounts:signInWithPassword?key={}", self.base_url, key),
            None => format!("{}/accounts:signInWithPassword", self.base_url),
        }
    }

    fn into_session(body: SignInResponse, now: DateTime<Utc>) -> AppResult<Session> {
        let seconds: i64 = body
            .expires_in
            .parse()
            .map_err(|_| AppError::Auth(format!("Unexpected token lifetime '{}'", body.expires_in)))?;

        Ok(Session {
            user_id: body.local_id,
            email: body.email,
            id_token: body.id_token,
            expires_at: now + chrono::Duration::seconds(seconds),
        })
    }
}

#[async_trait]
impl AuthProvider for PasswordAuthClient {
    async fn sign_in(&self, credentials: &Credentials) -> AppResult<Session> {
        let response = self
            .http_client
            .post(self.sign_in_url())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password,
                "returnSecureToken": true,
            }))
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            // The service answers bad credentials with 400 and a reason code
            let reason = response
                .json::<ErrorEnvelope>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(AppError::Auth(reason));
        }
        if !status.is_success() {
            return Err(AppError::Auth(format!("Identity service returned status: {}", status)));
        }

        let body: SignInResponse = response.json().await?;
        Self::into_session(body, Utc::now())
    }
}
