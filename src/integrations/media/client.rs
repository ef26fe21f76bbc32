// src/integrations/media/client.rs
//
// Image host upload client
//
// One multipart POST per file with an unsigned upload preset; the host
// answers with the public URL of the stored image.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::config::HttpConfig;
use crate::error::{AppError, AppResult};

/// A file picked in the listing form
#[derive(Debug, Clone, PartialEq)]
pub struct MediaBlob {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaBlob {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Upload one file and return its public URL
    async fn upload(&self, blob: MediaBlob) -> AppResult<String>;
}

/// Upload a batch one file at a time, keeping the input order.
///
/// Stops at the first failure; nothing uploaded so far is returned.
pub async fn upload_all(uploader: &dyn MediaUploader, blobs: Vec<MediaBlob>) -> AppResult<Vec<String>> {
    let mut urls = Vec::with_capacity(blobs.len());
    for blob in blobs {
        let name = blob.file_name.clone();
        let url = uploader.upload(blob).await.map_err(|e| match e {
            AppError::Upload(_) => e,
            other => AppError::Upload(format!("{}: {}", name, other)),
        })?;
        log::debug!("Uploaded {} -> {}", name, url);
        urls.push(url);
    }
    Ok(urls)
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

pub struct HttpMediaUploader {
    upload_url: String,
    upload_preset: String,
    http_client: Client,
}

impl HttpMediaUploader {
    pub fn new(upload_url: &str, upload_preset: &str, http: &HttpConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()?;

        Ok(Self {
            upload_url: upload_url.to_string(),
            upload_preset: upload_preset.to_string(),
            http_client,
        })
    }
}

#[async_trait]
impl MediaUploader for HttpMediaUploader {
    async fn upload(&self, blob: MediaBlob) -> AppResult<String> {
        let part = Part::bytes(blob.bytes)
            .file_name(blob.file_name.clone())
            .mime_str(&blob.content_type)
            .map_err(|e| AppError::Upload(format!("Invalid content type: {}", e)))?;

        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .http_client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Upload(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upload(format!(
                "Image host returned status: {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upload(format!("Failed to parse upload response: {}", e)))?;

        body.secure_url
            .or(body.url)
            .ok_or_else(|| AppError::Upload("Image host returned no URL".to_string()))
    }
}

/// Stand-in used when no upload endpoint is configured
pub struct DisabledMediaUploader;

#[async_trait]
impl MediaUploader for DisabledMediaUploader {
    async fn upload(&self, blob: MediaBlob) -> AppResult<String> {
        Err(AppError::Upload(format!(
            "Image uploads are not configured, cannot upload {}",
            blob.file_name
        )))
    }
}
