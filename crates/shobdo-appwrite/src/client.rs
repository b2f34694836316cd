use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use shobdo_config::store::StoreConfig;
use shobdo_core::error::StoreError;
use shobdo_core::store::VocabularyStore;
use shobdo_types::{Language, VocabularyEntry};

use crate::query::Query;

/// Vocabulary collection served by an Appwrite databases endpoint
#[derive(Clone)]
pub struct AppwriteStore {
    client: reqwest::Client,
    documents_url: String,
    project_id: String,
}

impl AppwriteStore {
    pub fn new(config: &StoreConfig, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(to_store_error)?;

        Ok(Self {
            client,
            documents_url: config.documents_url(),
            project_id: config.project_id.clone(),
        })
    }

    /// List documents matching every query
    async fn list_documents(&self, queries: &[Query]) -> Result<Vec<VocabularyEntry>, StoreError> {
        let params: Vec<(&str, String)> = queries.iter().map(|q| ("queries[]", q.encode())).collect();

        let response = self
            .client
            .get(&self.documents_url)
            .header("X-Appwrite-Project", &self.project_id)
            .query(&params)
            .send()
            .await
            .map_err(to_store_error)?;

        let status = response.status();
        let body = response.text().await.map_err(to_store_error)?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &body));
        }

        let list = decode_list(&body)?;
        tracing::debug!("Store returned {} of {} documents", list.documents.len(), list.total);
        Ok(list.documents)
    }
}

#[async_trait]
impl VocabularyStore for AppwriteStore {
    async fn search(
        &self,
        field: Language,
        term: &str,
        limit: Option<usize>,
    ) -> Result<Vec<VocabularyEntry>, StoreError> {
        let mut queries = vec![Query::search(field.field(), term)];
        if let Some(limit) = limit {
            queries.push(Query::Limit(limit));
        }

        self.list_documents(&queries).await
    }

    async fn list_page(
        &self,
        cursor: Option<&str>,
        page_size: usize,
    ) -> Result<Vec<VocabularyEntry>, StoreError> {
        let mut queries = vec![Query::Limit(page_size)];
        if let Some(id) = cursor {
            queries.push(Query::CursorAfter(id.to_string()));
        }

        self.list_documents(&queries).await
    }
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    total: u64,
    documents: Vec<VocabularyEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn decode_list(body: &str) -> Result<DocumentList, StoreError> {
    serde_json::from_str(body).map_err(|e| StoreError::Decode(e.to_string()))
}

fn api_error(status: u16, body: &str) -> StoreError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.message)
        .unwrap_or_else(|_| body.to_string());

    StoreError::Api { status, message }
}

fn to_store_error(e: reqwest::Error) -> StoreError {
    if e.is_decode() {
        StoreError::Decode(e.to_string())
    } else {
        StoreError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_document_list() {
        let body = r#"{
            "total": 2,
            "documents": [
                {"$id": "a1", "$collectionId": "words", "bangla": "পানি", "korean": "물", "frequency": 4},
                {"$id": "a2", "$collectionId": "words", "bangla": "ভাত", "korean": "밥"}
            ]
        }"#;

        let list = decode_list(body).unwrap();
        assert_eq!(list.total, 2);
        assert_eq!(list.documents[0].id, "a1");
        assert_eq!(list.documents[0].frequency, Some(4));
        assert_eq!(list.documents[1].frequency, None);
    }

    #[test]
    fn test_malformed_list_is_decode_error() {
        assert!(matches!(
            decode_list(r#"{"documents": "nope"}"#),
            Err(StoreError::Decode(_))
        ));
    }

    #[test]
    fn test_api_error_uses_message() {
        let error = api_error(401, r#"{"message":"Missing scope","code":401,"type":"general_unauthorized_scope"}"#);
        match error {
            StoreError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Missing scope");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_api_error_falls_back_to_body() {
        match api_error(502, "Bad Gateway") {
            StoreError::Api { message, .. } => assert_eq!(message, "Bad Gateway"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
