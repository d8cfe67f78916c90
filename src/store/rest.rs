//! Firestore REST client
//!
//! Minimal store client over the Firestore REST v1 API:
//! - `GET {base}/{parent}/documents/{collection}` with page-token paging
//! - `POST {base}/{parent}/documents:listCollectionIds` for discovery
//!
//! Credential acquisition is out of scope: the client accepts a ready
//! bearer token, or talks to the emulator without one. Requests are
//! sequential, one page at a time, pulled by the export pipeline.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::value::Document;

use super::wire::{self, ListCollectionIdsResponse, ListDocumentsResponse};
use super::{DocumentStore, DocumentStream};

const PRODUCTION_ENDPOINT: &str = "https://firestore.googleapis.com/v1";

/// Settings for [`FirestoreRestStore`].
#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// GCP project identifier.
    pub project_id: String,
    /// Database identifier, usually `(default)`.
    pub database_id: String,
    /// Ready OAuth bearer token; not needed against the emulator.
    pub access_token: Option<String>,
    /// Emulator `host:port`; switches the endpoint to plain HTTP.
    pub emulator_host: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Documents requested per page.
    pub page_size: usize,
}

/// Document store backed by the Firestore REST API.
pub struct FirestoreRestStore {
    http: Client,
    base_url: String,
    parent: String,
    access_token: Option<String>,
    page_size: usize,
}

impl FirestoreRestStore {
    /// Build a client from settings.
    ///
    /// Only the settings are validated here; reachability of the store
    /// surfaces on the first request.
    pub fn connect(settings: StoreSettings) -> Result<Self> {
        if settings.project_id.is_empty() {
            return Err(StoreError::InvalidEndpoint("project id is empty".to_string()).into());
        }
        if settings.database_id.is_empty() {
            return Err(StoreError::InvalidEndpoint("database id is empty".to_string()).into());
        }

        let base_url = match &settings.emulator_host {
            Some(host) => format!("http://{host}/v1"),
            None => PRODUCTION_ENDPOINT.to_string(),
        };
        let parent = format!(
            "projects/{}/databases/{}",
            settings.project_id, settings.database_id
        );
        let http = Client::builder().timeout(settings.timeout).build()?;

        info!("Using Firestore endpoint {} for {}", base_url, parent);

        Ok(Self {
            http,
            base_url,
            parent,
            access_token: settings.access_token,
            page_size: settings.page_size.max(1),
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!("{}/{}/documents/{}", self.base_url, self.parent, collection)
    }

    fn list_collection_ids_url(&self) -> String {
        format!("{}/{}/documents:listCollectionIds", self.base_url, self.parent)
    }
}

/// Turn an error-status response into a [`StoreError`].
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::RequestFailed {
        status: status.as_u16(),
        message,
    }
    .into())
}

#[async_trait]
impl DocumentStore for FirestoreRestStore {
    async fn list_collection_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut body = json!({ "pageSize": self.page_size as u32 });
            if let Some(token) = &page_token {
                body["pageToken"] = json!(token);
            }

            let mut request = self.http.post(self.list_collection_ids_url()).json(&body);
            if let Some(token) = &self.access_token {
                request = request.bearer_auth(token);
            }

            let response = check_status(request.send().await?).await?;
            let page: ListCollectionIdsResponse = response
                .json()
                .await
                .map_err(|e| StoreError::DecodeFailed(e.to_string()))?;

            ids.extend(page.collection_ids);
            page_token = page.next_page_token.filter(|token| !token.is_empty());
            if page_token.is_none() {
                break;
            }
        }

        debug!("Discovered {} top-level collection(s)", ids.len());
        Ok(ids)
    }

    async fn stream_documents(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Box<dyn DocumentStream>> {
        Ok(Box::new(RestDocumentStream {
            http: self.http.clone(),
            url: self.documents_url(collection),
            access_token: self.access_token.clone(),
            page_size: self.page_size,
            limit,
            fetched: 0,
            page_token: None,
            done: false,
        }))
    }
}

/// Page-by-page document stream over one collection.
///
/// Single-pass: a transport error marks the stream done and is returned
/// to the caller; the stream yields `None` from then on.
struct RestDocumentStream {
    http: Client,
    url: String,
    access_token: Option<String>,
    page_size: usize,
    limit: usize,
    fetched: usize,
    page_token: Option<String>,
    done: bool,
}

impl RestDocumentStream {
    fn next_page_size(&self) -> usize {
        if self.limit > 0 {
            self.page_size.min(self.limit - self.fetched)
        } else {
            self.page_size
        }
    }
}

#[async_trait]
impl DocumentStream for RestDocumentStream {
    async fn next_batch(&mut self) -> Result<Option<Vec<Document>>> {
        if self.done {
            return Ok(None);
        }
        if self.limit > 0 && self.fetched >= self.limit {
            self.done = true;
            return Ok(None);
        }

        let mut request = self
            .http
            .get(&self.url)
            .query(&[("pageSize", self.next_page_size().to_string())]);
        if let Some(token) = &self.page_token {
            request = request.query(&[("pageToken", token.as_str())]);
        }
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                self.done = true;
                return Err(e.into());
            }
        };
        let response = match check_status(response).await {
            Ok(response) => response,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };
        let page: ListDocumentsResponse = match response.json().await {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Err(StoreError::DecodeFailed(e.to_string()).into());
            }
        };

        let mut batch: Vec<Document> =
            page.documents.into_iter().map(wire::decode_document).collect();
        if self.limit > 0 {
            let remaining = self.limit - self.fetched;
            if batch.len() >= remaining {
                batch.truncate(remaining);
                self.done = true;
            }
        }

        self.page_token = page.next_page_token.filter(|token| !token.is_empty());
        if self.page_token.is_none() {
            self.done = true;
        }
        self.fetched += batch.len();

        if batch.is_empty() {
            debug!("Document stream exhausted after {} documents", self.fetched);
            self.done = true;
            return Ok(None);
        }

        debug!(
            "Fetched batch of {} documents (total: {})",
            batch.len(),
            self.fetched
        );
        Ok(Some(batch))
    }
}
