//! API request/response types

pub mod cache;
pub mod error;
pub mod json;

pub use cache::{
    SearchRequest, SearchResponse, StoreQueryRequest, StoreQueryResponse, STATUS_NO_MATCH,
    STATUS_SUCCESS,
};
pub use error::{ApiError, ApiErrorBody};
pub use json::Json;
