//! Request/response types for the cache endpoints

use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_NO_MATCH: &str = "No similar query found with sufficient similarity";

/// POST /query request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreQueryRequest {
    pub query: String,
    pub response: String,
}

/// POST /query success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreQueryResponse {
    pub query_hash: String,
    pub status: String,
}

impl StoreQueryResponse {
    pub fn success(query_hash: impl Into<String>) -> Self {
        Self {
            query_hash: query_hash.into(),
            status: STATUS_SUCCESS.to_string(),
        }
    }
}

/// POST /search request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// POST /search success body; a miss is a 200 with only a status line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Hit {
        query: String,
        response: String,
        status: String,
    },
    Miss {
        status: String,
    },
}

impl SearchResponse {
    pub fn hit(query: impl Into<String>, response: impl Into<String>) -> Self {
        Self::Hit {
            query: query.into(),
            response: response.into(),
            status: STATUS_SUCCESS.to_string(),
        }
    }

    pub fn miss() -> Self {
        Self::Miss {
            status: STATUS_NO_MATCH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_response_serialization() {
        let response = StoreQueryResponse::success("abc123");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["query_hash"], "abc123");
        assert_eq!(json["status"], "success");
    }

    #[test]
    fn test_search_hit_serialization() {
        let response = SearchResponse::hit("What is the capital of France?", "Paris");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["query"], "What is the capital of France?");
        assert_eq!(json["response"], "Paris");
        assert_eq!(json["status"], "success");
    }

    #[test]
    fn test_search_miss_serialization() {
        let response = SearchResponse::miss();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json["status"],
            "No similar query found with sufficient similarity"
        );
        assert!(json.get("query").is_none());
        assert!(json.get("response").is_none());
    }

    #[test]
    fn test_store_request_deserialization() {
        let request: StoreQueryRequest = serde_json::from_str(
            r#"{"query": "What is the capital of France?", "response": "Paris"}"#,
        )
        .unwrap();

        assert_eq!(request.query, "What is the capital of France?");
        assert_eq!(request.response, "Paris");
    }
}
