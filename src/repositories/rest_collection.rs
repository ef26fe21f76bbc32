// src/repositories/rest_collection.rs
//
// Document collection over JSON/HTTP
//
// Endpoint layout:
//   GET    {base}/{collection}?orderBy=..&direction=..   -> { "documents": [ { id, fields } ] }
//   POST   {base}/{collection}         { fields }         -> { "id": .. }
//   PATCH  {base}/{collection}/{id}    { fields }         (merge)
//   DELETE {base}/{collection}/{id}
//
// Requests carry the project key as `?key=` and, once an admin has signed
// in, the session token as a bearer header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

use crate::config::HttpConfig;
use crate::domain::{Document, Fields, OrderBy, SortDirection};
use crate::error::{AppError, AppResult};
use crate::integrations::identity::{current_token, SessionHandle};

use super::document_collection::DocumentCollection;

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
}

pub struct RestDocumentCollection {
    base_url: String,
    api_key: Option<String>,
    session: Option<SessionHandle>,
    http_client: Client,
}

impl RestDocumentCollection {
    pub fn new(base_url: &str, api_key: Option<String>, http: &HttpConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            session: None,
            http_client,
        })
    }

    /// Attach the session whose token authorizes writes
    pub fn with_session(mut self, session: SessionHandle) -> Self {
        self.session = Some(session);
        self
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }

    fn authorize(&self, mut request: RequestBuilder) -> RequestBuilder {
        request = request.header(header::ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }
        if let Some(token) = self.session.as_ref().and_then(current_token) {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        request
    }

    fn check(response: Response, action: &str) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status == StatusCode::NOT_FOUND {
            Err(AppError::NotFound)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            Err(AppError::Auth(format!("{} rejected with status {}", action, status)))
        } else {
            Err(AppError::Other(format!("{} returned status: {}", action, status)))
        }
    }
}

fn direction_param(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    }
}

#[async_trait]
impl DocumentCollection for RestDocumentCollection {
    async fn fetch_all(
        &self,
        collection: &str,
        order: Option<OrderBy>,
    ) -> AppResult<Vec<Document>> {
        let mut request = self.http_client.get(self.collection_url(collection));
        if let Some(order) = &order {
            request = request.query(&[
                ("orderBy", order.field.as_str()),
                ("direction", direction_param(order.direction)),
            ]);
        }

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("GET {} failed: {}", collection, e)))?;
        let response = Self::check(response, "fetch").map_err(AppError::into_fetch)?;

        let body: ListResponse = response
            .json()
            .await
            .map_err(|e| AppError::Fetch(format!("Failed to parse {} listing: {}", collection, e)))?;

        Ok(body.documents)
    }

    async fn create(&self, collection: &str, fields: Fields) -> AppResult<String> {
        let request = self
            .http_client
            .post(self.collection_url(collection))
            .json(&json!({ "fields": fields }));

        let response = self.authorize(request).send().await?;
        let response = Self::check(response, "create")?;
        let body: CreateResponse = response.json().await?;
        Ok(body.id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> AppResult<()> {
        let request = self
            .http_client
            .patch(self.document_url(collection, id))
            .json(&json!({ "fields": fields }));

        let response = self.authorize(request).send().await?;
        Self::check(response, "update")?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let request = self.http_client.delete(self.document_url(collection, id));

        let response = self.authorize(request).send().await?;
        Self::check(response, "delete")?;
        Ok(())
    }
}
