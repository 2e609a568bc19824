//! Wire types shared by every endpoint
//!
//! The backend wraps every response in a uniform envelope:
//!
//! ```json
//! {
//!   "timestamp": "2026-08-06T10:15:00Z",
//!   "httpStatus": 200,
//!   "isSuccess": true,
//!   "message": "OK",
//!   "data": { ... },
//!   "subErrors": []
//! }
//! ```
//!
//! `isSuccess: false` carries a business error in `message` plus optional
//! field-level `subErrors`. List endpoints return a [`Page`] in `data`.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Uniform response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    /// Server-side timestamp of the response
    pub timestamp: String,
    /// HTTP status the backend believes it returned
    pub http_status: u16,
    /// Whether the operation succeeded
    pub is_success: bool,
    /// Human-readable outcome message
    pub message: String,
    /// Payload, present on success for data-bearing operations
    #[serde(default)]
    pub data: Option<T>,
    /// Field-level errors, present on business failures
    #[serde(default)]
    pub sub_errors: Vec<SubError>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, converting business failures into errors
    ///
    /// A success envelope without `data` is treated as a malformed response.
    pub fn into_data(self) -> ApiResult<T> {
        if !self.is_success {
            return Err(ApiError::backend(self.message, self.sub_errors));
        }
        self.data
            .ok_or_else(|| ApiError::api(self.http_status, "Envelope is missing data"))
    }

    /// Check the envelope for success, discarding any payload
    pub fn into_unit(self) -> ApiResult<()> {
        if self.is_success {
            Ok(())
        } else {
            Err(ApiError::backend(self.message, self.sub_errors))
        }
    }
}

/// Field-level error reported by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubError {
    /// Offending field
    pub field: String,
    /// What went wrong
    pub message: String,
    /// Rejected value, if echoed back
    #[serde(default)]
    pub rejected_value: Option<String>,
}

impl std::fmt::Display for SubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// One page of a list response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub content: Vec<T>,
    /// Zero-based page index
    pub page: u32,
    /// Requested page size
    pub size: u32,
    /// Total matching items across all pages
    pub total_elements: u64,
    /// Total page count
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// True when this is the last page
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.total_pages == 0 || self.page + 1 >= self.total_pages
    }
}

/// Query parameters for paginated list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    /// Zero-based page index
    pub page: u32,
    /// Page size (backend caps at 100)
    pub size: u32,
    /// Free-text search filter
    pub search: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            search: None,
        }
    }
}

impl PageQuery {
    /// Create query params with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page index
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the search filter
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Render as a query string (no leading `?`)
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut parts = vec![format!("page={}", self.page), format!("size={}", self.size)];
        if let Some(ref search) = self.search {
            parts.push(format!("search={}", urlencode(search)));
        }
        parts.join("&")
    }
}

/// Minimal percent-encoding for query string values
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            b' ' => out.push_str("%20"),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_success_deserialize() {
        let json = r#"{
            "timestamp": "2026-08-06T10:15:00Z",
            "httpStatus": 200,
            "isSuccess": true,
            "message": "OK",
            "data": {"id": 1}
        }"#;

        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(envelope.is_success);
        let data = envelope.into_data().unwrap();
        assert_eq!(data["id"], 1);
    }

    #[test]
    fn test_envelope_business_error() {
        let json = r#"{
            "timestamp": "2026-08-06T10:15:00Z",
            "httpStatus": 400,
            "isSuccess": false,
            "message": "Name already exists",
            "subErrors": [{"field": "name", "message": "duplicate"}]
        }"#;

        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        let err = envelope.into_data().unwrap_err();
        match err {
            crate::error::ApiError::Backend { message, sub_errors } => {
                assert_eq!(message, "Name already exists");
                assert_eq!(sub_errors.len(), 1);
                assert_eq!(sub_errors[0].field, "name");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_envelope_unit_success_without_data() {
        let json = r#"{
            "timestamp": "2026-08-06T10:15:00Z",
            "httpStatus": 200,
            "isSuccess": true,
            "message": "Deleted"
        }"#;

        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(envelope.into_unit().is_ok());
    }

    #[test]
    fn test_page_is_last() {
        let page: Page<u32> = Page {
            content: vec![1, 2],
            page: 2,
            size: 2,
            total_elements: 6,
            total_pages: 3,
        };
        assert!(page.is_last());

        let page: Page<u32> = Page {
            content: vec![1, 2],
            page: 0,
            size: 2,
            total_elements: 6,
            total_pages: 3,
        };
        assert!(!page.is_last());
    }

    #[test]
    fn test_page_query_to_query() {
        let query = PageQuery::new().with_page(2).with_size(50);
        assert_eq!(query.to_query(), "page=2&size=50");

        let query = PageQuery::new().with_search("summer dress");
        assert_eq!(query.to_query(), "page=0&size=20&search=summer%20dress");
    }
}
