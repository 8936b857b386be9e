//! Generic document-store REST client.
//!
//! The store exposes named collections of JSON documents with
//! server-assigned ids: list-all, add, partial update and delete. Two
//! collections are used here: `sites` and `observations`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use crate::error::StoreError;

pub const SITES_COLLECTION: &str = "sites";
pub const OBSERVATIONS_COLLECTION: &str = "observations";

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct DocumentClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DocumentClient {
    /// Create a client for the store at `base_url`, authenticating with
    /// a static API key.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/v1/{}", self.base_url, collection)
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/v1/{}/{}", self.base_url, collection, id)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// List every document in a collection.
    ///
    /// # Errors
    /// `StoreError::Unavailable` when the store cannot be reached.
    #[instrument(skip(self), level = "info")]
    pub async fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .get(self.collection_url(collection))
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Add a document; the store assigns the id and returns the created
    /// document.
    ///
    /// # Errors
    /// `StoreError::Unavailable` when the store cannot be reached.
    #[instrument(skip(self, body), level = "info")]
    pub async fn add<B: Serialize, T: DeserializeOwned>(
        &self,
        collection: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .post(self.collection_url(collection))
            .header("Authorization", self.auth_header())
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Apply a partial update to one document.
    ///
    /// # Errors
    /// `StoreError::Unavailable` when the store cannot be reached.
    #[instrument(skip(self, patch), level = "info")]
    pub async fn update<B: Serialize>(
        &self,
        collection: &str,
        id: &str,
        patch: &B,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .patch(self.document_url(collection, id))
            .header("Authorization", self.auth_header())
            .json(patch)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(StoreError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    /// Delete one document. A missing document counts as success.
    ///
    /// # Errors
    /// `StoreError::Unavailable` when the store cannot be reached.
    #[instrument(skip(self), level = "info")]
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let status = response.status();
        // Deleting an already-deleted document is idempotent.
        if status.is_success() || status.as_u16() == 404 {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(StoreError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| StoreError::InvalidResponse(e.to_string()))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(StoreError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Doc {
        id: String,
        value: i64,
    }

    fn client(server: &MockServer) -> DocumentClient {
        DocumentClient::new(&server.uri(), "test_key").unwrap()
    }

    #[tokio::test]
    async fn test_list_sends_bearer_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/sites"))
            .and(header("Authorization", "Bearer test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "a", "value": 1},
                {"id": "b", "value": 2}
            ])))
            .mount(&mock_server)
            .await;

        let docs: Vec<Doc> = client(&mock_server).list(SITES_COLLECTION).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a");
    }

    #[tokio::test]
    async fn test_add_returns_created_document() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/sites"))
            .and(body_json(serde_json::json!({"value": 7})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": "new-id", "value": 7})),
            )
            .mount(&mock_server)
            .await;

        let doc: Doc = client(&mock_server)
            .add(SITES_COLLECTION, &serde_json::json!({"value": 7}))
            .await
            .unwrap();
        assert_eq!(doc, Doc { id: "new-id".to_string(), value: 7 });
    }

    #[tokio::test]
    async fn test_update_patches_single_document() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/v1/sites/abc"))
            .and(body_json(serde_json::json!({"value": 9})))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server)
            .update(SITES_COLLECTION, "abc", &serde_json::json!({"value": 9}))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_treats_not_found_as_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/sites/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server).delete(SITES_COLLECTION, "gone").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_surfaces_other_failures() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/sites/abc"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server).delete(SITES_COLLECTION, "abc").await;
        assert!(matches!(result, Err(StoreError::Api { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_unreachable_store_maps_to_unavailable() {
        // Port 1 is never bound: the connection is refused immediately.
        let client = DocumentClient::new("http://127.0.0.1:1", "test_key").unwrap();
        let result: Result<Vec<Doc>, _> = client.list(SITES_COLLECTION).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/sites"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let result: Result<Vec<Doc>, _> = client(&mock_server).list(SITES_COLLECTION).await;
        assert!(matches!(result, Err(StoreError::InvalidResponse(_))));
    }
}
