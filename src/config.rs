// src/config.rs
//
// Runtime configuration, read from LISTINGHUB_* environment variables.
// Optional settings fall back to defaults and say so in the log.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

const PREFIX: &str = "LISTINGHUB_";

/// HTTP client tunables shared by every remote collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the document REST endpoint
    pub documents_url: String,

    /// Project API key, appended to document and identity requests
    pub api_key: Option<String>,

    /// Base URL of the password sign-in endpoint
    pub identity_url: String,

    /// Image host upload endpoint; uploads are disabled when unset
    pub media_upload_url: Option<String>,

    /// Unsigned upload preset sent with every image
    pub media_upload_preset: String,

    pub http: HttpConfig,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{PREFIX}{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let documents_url = var("DOCUMENTS_URL").ok_or_else(|| {
            AppError::Config(format!("{PREFIX}DOCUMENTS_URL must be set"))
        })?;

        let api_key = var("API_KEY");
        if api_key.is_none() {
            log::warn!("{PREFIX}API_KEY not set, requests go out without a key");
        }

        let media_upload_url = var("MEDIA_UPLOAD_URL");
        if media_upload_url.is_none() {
            log::info!("{PREFIX}MEDIA_UPLOAD_URL not set, image uploads are disabled");
        }

        Ok(Self {
            documents_url: documents_url.trim_end_matches('/').to_string(),
            api_key,
            identity_url: or_default(
                var("IDENTITY_URL"),
                "IDENTITY_URL",
                "https://identitytoolkit.googleapis.com/v1",
            ),
            media_upload_url,
            media_upload_preset: or_default(var("MEDIA_UPLOAD_PRESET"), "MEDIA_UPLOAD_PRESET", "unsigned"),
            http: HttpConfig {
                timeout_secs: parse_or_default(var("HTTP_TIMEOUT_SECS"), "HTTP_TIMEOUT_SECS", 30)?,
            },
        })
    }
}

fn or_default(value: Option<String>, name: &str, default: &str) -> String {
    value.unwrap_or_else(|| {
        log::info!("{PREFIX}{name} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_or_default<T>(value: Option<String>, name: &str, default: T) -> AppResult<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match value {
        None => {
            log::info!("{PREFIX}{name} not set, using default: {default}");
            Ok(default)
        }
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {PREFIX}{name} value '{raw}': {e}"))),
    }
}
