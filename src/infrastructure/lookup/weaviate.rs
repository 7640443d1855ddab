//! Weaviate lookup store implementation
//!
//! Talks to a Weaviate instance that performs the embedding itself
//! (text2vec module). Writes go through the objects endpoint, similarity
//! searches through a GraphQL `nearText` query asking for the top-1
//! candidate and its certainty.

use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::HttpClientTrait;
use crate::domain::hash::QueryHash;
use crate::domain::lookup::{LookupStore, NearestQuery};
use crate::domain::DomainError;

const DEFAULT_WEAVIATE_BASE_URL: &str = "http://localhost:8080";
const STORE_NAME: &str = "Weaviate";

/// Weaviate-backed lookup store
#[derive(Debug)]
pub struct WeaviateLookupStore<C: HttpClientTrait> {
    client: C,
    base_url: String,
    class_name: String,
    embedding_api_key: Option<String>,
}

impl<C: HttpClientTrait> WeaviateLookupStore<C> {
    /// Create a store against the default local Weaviate endpoint
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_WEAVIATE_BASE_URL)
    }

    /// Create a store against a custom base URL
    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            base_url,
            class_name: "Query".to_string(),
            embedding_api_key: None,
        }
    }

    /// Set the class queries are indexed under
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the embedding API key forwarded to the index's vectorizer module
    pub fn with_embedding_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.embedding_api_key = Some(api_key.into());
        self
    }

    fn objects_url(&self) -> String {
        format!("{}/v1/objects", self.base_url)
    }

    fn graphql_url(&self) -> String {
        format!("{}/v1/graphql", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];

        if let Some(ref key) = self.embedding_api_key {
            headers.push(("X-OpenAI-Api-Key", key.as_str()));
        }

        headers
    }

    fn build_create_object(&self, text: &str, hash: &QueryHash) -> serde_json::Value {
        serde_json::json!({
            "class": self.class_name,
            "properties": {
                "query": text,
                "query_hash": hash.as_str(),
            },
        })
    }

    fn build_near_text_query(&self, text: &str) -> Result<serde_json::Value, DomainError> {
        // serde_json string encoding doubles as GraphQL string escaping
        let concept = serde_json::to_string(text)
            .map_err(|e| DomainError::index_read(STORE_NAME, e.to_string()))?;

        let query = format!(
            "{{ Get {{ {}(nearText: {{concepts: [{}]}}, limit: 1) {{ query_hash _additional {{ certainty }} }} }} }}",
            self.class_name, concept
        );

        Ok(serde_json::json!({ "query": query }))
    }

    fn parse_nearest(
        &self,
        json: serde_json::Value,
    ) -> Result<Option<NearestQuery>, DomainError> {
        let response: GraphQlResponse = serde_json::from_value(json)
            .map_err(|e| DomainError::index_read(STORE_NAME, e.to_string()))?;

        if let Some(errors) = response.errors {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(DomainError::index_read(STORE_NAME, message));
        }

        let candidates = response
            .data
            .and_then(|d| d.get.classes.into_values().next())
            .unwrap_or_default();

        let Some(candidate) = candidates.into_iter().next() else {
            return Ok(None);
        };

        let hash = candidate.query_hash.ok_or_else(|| {
            DomainError::index_read(STORE_NAME, "nearest entry has no query_hash property")
        })?;

        Ok(Some(NearestQuery::new(
            QueryHash::from_hex(hash),
            candidate.additional.certainty,
        )))
    }
}

#[async_trait]
impl<C: HttpClientTrait> LookupStore for WeaviateLookupStore<C> {
    async fn index(&self, text: &str, hash: &QueryHash) -> Result<(), DomainError> {
        let body = self.build_create_object(text, hash);

        self.client
            .post_json(&self.objects_url(), self.headers(), &body)
            .await
            .map_err(|e| DomainError::index_write(STORE_NAME, e.to_string()))?;

        Ok(())
    }

    async fn find_nearest(&self, text: &str) -> Result<Option<NearestQuery>, DomainError> {
        let body = self.build_near_text_query(text)?;

        let response = self
            .client
            .post_json(&self.graphql_url(), self.headers(), &body)
            .await
            .map_err(|e| DomainError::index_read(STORE_NAME, e.to_string()))?;

        self.parse_nearest(response)
    }

    fn store_name(&self) -> &str {
        STORE_NAME
    }
}

// Weaviate GraphQL response types

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    #[serde(rename = "Get")]
    get: GetSection,
}

#[derive(Debug, Deserialize)]
struct GetSection {
    // keyed by class name, e.g. {"Query": [...]}
    #[serde(flatten)]
    classes: std::collections::HashMap<String, Vec<NearTextCandidate>>,
}

#[derive(Debug, Deserialize)]
struct NearTextCandidate {
    query_hash: Option<String>,
    #[serde(rename = "_additional")]
    additional: CandidateAdditional,
}

#[derive(Debug, Deserialize)]
struct CandidateAdditional {
    certainty: f32,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}
