//! HTTP client for the catalog backend.
//!
//! ## Endpoints
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | GET | `/api/{collection}?isActive=true` | active-siblings snapshot |
//! | GET | `/api/{collection}/{id}` | one record |
//! | PUT | `/api/{collection}/{id}/lifecycle` | lifecycle transition |
//! | PUT | `/api/vouchers/{id}` | voucher edit |
//! | DELETE | `/api/{collection}/{id}` | delete |

use std::time::Duration;

use catalog_core::{EntityId, EntityKind};
use catalog_state::{LifecyclePayload, LifecycleRecord, SiblingSnapshot, Voucher, VoucherChanges};
use serde::de::DeserializeOwned;

use crate::backend::CatalogBackend;
use crate::config::{ClientConfig, ConfigError, Credentials};
use crate::envelope::{message_from_body, ApiEnvelope};
use crate::error::ClientError;

/// Typed client for the catalog backend. Cheap to clone; share via `Arc`
/// or by cloning.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Build a client that authenticates every request with `credentials`.
    pub fn new(config: ClientConfig, credentials: &Credentials) -> Result<Self, ClientError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth = reqwest::header::HeaderValue::from_str(credentials.bearer().as_str())
            .map_err(|_| ConfigError::InvalidToken)?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client builder".into(),
                source: e,
            })?;

        let base_url = config.base_url.as_str().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// Base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the lifecycle view of one entity.
    pub async fn fetch_record(
        &self,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<LifecycleRecord, ClientError> {
        let endpoint = format!("GET /api/{}/{id}", kind.collection());
        let url = format!("{}/api/{}/{id}", self.base_url, kind.collection());
        self.send_for_data(self.http.get(&url), &endpoint).await
    }

    /// Fetch a voucher with its usage counters.
    pub async fn fetch_voucher(&self, id: EntityId) -> Result<Voucher, ClientError> {
        let collection = EntityKind::Voucher.collection();
        let endpoint = format!("GET /api/{collection}/{id}");
        let url = format!("{}/api/{collection}/{id}", self.base_url);
        self.send_for_data(self.http.get(&url), &endpoint).await
    }

    async fn send_for_data<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ClientError> {
        self.send::<T>(request, endpoint)
            .await?
            .ok_or_else(|| ClientError::MissingData {
                endpoint: endpoint.to_string(),
            })
    }

    /// Send a request and unwrap the envelope.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<Option<T>, ClientError> {
        tracing::debug!(endpoint, "calling catalog backend");

        let resp = request.send().await.map_err(|e| ClientError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(endpoint, status = status.as_u16(), "catalog backend returned error status");
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: message_from_body(&body),
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|e| ClientError::Http {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        let envelope: ApiEnvelope<T> =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::Deserialization {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        if !envelope.is_success() {
            tracing::warn!(
                endpoint,
                err_code = envelope.err_code,
                "catalog backend rejected request"
            );
        }
        envelope.into_result(endpoint)
    }
}

impl CatalogBackend for CatalogClient {
    async fn list_active(&self, kind: EntityKind) -> Result<Vec<SiblingSnapshot>, ClientError> {
        let endpoint = format!("GET /api/{}?isActive=true", kind.collection());
        let url = format!("{}/api/{}?isActive=true", self.base_url, kind.collection());
        let rows: Vec<SiblingSnapshot> = self.send_for_data(self.http.get(&url), &endpoint).await?;
        // The filter is server-side; drop anything that slipped through.
        Ok(rows.into_iter().filter(|s| s.is_active).collect())
    }

    async fn submit_lifecycle(
        &self,
        kind: EntityKind,
        payload: &LifecyclePayload,
    ) -> Result<(), ClientError> {
        let endpoint = format!("PUT /api/{}/{}/lifecycle", kind.collection(), payload.id);
        let url = format!(
            "{}/api/{}/{}/lifecycle",
            self.base_url,
            kind.collection(),
            payload.id
        );
        self.send::<serde_json::Value>(self.http.put(&url).json(payload), &endpoint)
            .await?;
        Ok(())
    }

    async fn update_voucher(&self, id: EntityId, changes: &VoucherChanges) -> Result<(), ClientError> {
        let collection = EntityKind::Voucher.collection();
        let endpoint = format!("PUT /api/{collection}/{id}");
        let url = format!("{}/api/{collection}/{id}", self.base_url);
        self.send::<serde_json::Value>(self.http.put(&url).json(changes), &endpoint)
            .await?;
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<(), ClientError> {
        let endpoint = format!("DELETE /api/{}/{id}", kind.collection());
        let url = format!("{}/api/{}/{id}", self.base_url, kind.collection());
        self.send::<serde_json::Value>(self.http.delete(&url), &endpoint)
            .await?;
        Ok(())
    }
}
