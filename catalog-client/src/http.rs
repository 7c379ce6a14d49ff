//! HTTP implementation of the remote catalog boundary

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::catalog::{CatalogUpsert, RemoteCatalog, build_upsert_objects};
use crate::config::RemoteConfig;
use crate::error::{RemoteError, RemoteResult};
use crate::types::{CatalogObjects, DeletePairResponse, RetrievePairRequest, UpsertPairRequest};

/// Reqwest-backed client for the remote catalog service.
///
/// Carries the per-call timeout from [`RemoteConfig`]; no retries are
/// performed here or anywhere above.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpCatalog {
    /// Create a new client from configuration.
    pub fn new(config: &RemoteConfig) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> RemoteResult<T> {
        let request = match self.auth_header() {
            Some(auth) => request.header(reqwest::header::AUTHORIZATION, auth),
            None => request,
        };

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> RemoteResult<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return match status {
                StatusCode::CONFLICT => Err(RemoteError::VersionConflict(body)),
                _ => Err(RemoteError::Status {
                    status: status.as_u16(),
                    body,
                }),
            };
        }

        response.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl RemoteCatalog for HttpCatalog {
    async fn upsert_pair(
        &self,
        idempotency_key: &str,
        upsert: &CatalogUpsert,
    ) -> RemoteResult<CatalogObjects> {
        let (item, variation) = build_upsert_objects(upsert);
        let body = UpsertPairRequest {
            idempotency_key: idempotency_key.to_string(),
            item,
            variation,
        };

        tracing::debug!(
            idempotency_key,
            update = upsert.is_update(),
            "Upserting catalog pair"
        );
        self.send(self.client.post(self.url("/v1/catalog/pair")).json(&body))
            .await
    }

    async fn retrieve_pair(
        &self,
        item_id: &str,
        variation_id: &str,
    ) -> RemoteResult<CatalogObjects> {
        let body = RetrievePairRequest {
            object_ids: vec![item_id.to_string(), variation_id.to_string()],
            include_related_objects: true,
        };

        self.send(
            self.client
                .post(self.url("/v1/catalog/batch-retrieve"))
                .json(&body),
        )
        .await
    }

    async fn delete_pair(&self, item_id: &str) -> RemoteResult<DeletePairResponse> {
        tracing::debug!(item_id, "Deleting catalog pair");
        self.send(
            self.client
                .delete(self.url(&format!("/v1/catalog/object/{item_id}"))),
        )
        .await
    }
}
