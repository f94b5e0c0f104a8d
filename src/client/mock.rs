//! Mock SMERSH API transport for testing
//!
//! Responses are queued in wire form and normalized on the way out, exactly
//! like the real transport does, so model tests exercise the whole decode path
//! without an HTTP server.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::SmershApi;
use super::smersh::status_error;
use super::wire::clean_ldjson;
use crate::error::{ApiError, Result};

/// One queued answer of the mock transport.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Successful answer with a raw JSON-LD body
    Body(Value),
    /// Successful answer without usable body (204, empty, non-JSON)
    Empty,
    /// HTTP failure with the given status code
    Status(u16),
    /// 400 answer carrying this description
    Rejected(String),
}

impl MockResponse {
    pub fn body(value: Value) -> Self {
        MockResponse::Body(value)
    }
}

/// Mock API transport for testing.
///
/// Queue responses with the builder methods; each request consumes one.
/// An exhausted queue answers with no data.
///
/// # Example
/// ```ignore
/// let api = MockSmershApi::new()
///     .with_response(MockResponse::body(json!({ "@id": "/api/missions/1" })))
///     .await;
///
/// let mission = Mission::get(&api, "1").await?;
/// ```
#[derive(Default)]
pub struct MockSmershApi {
    /// Answers, consumed in order
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts per HTTP method
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub get: usize,
    pub post: usize,
    pub patch: usize,
    pub delete: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.get + self.post + self.patch + self.delete
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    /// Path relative to the server root
    pub path: String,
    pub body: Option<Value>,
    pub content_type: String,
}

impl MockSmershApi {
    /// Create a new mock transport with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one answer.
    pub async fn with_response(self, response: MockResponse) -> Self {
        self.responses.lock().await.push_back(response);
        self
    }

    /// Queue several answers, in order.
    pub async fn with_responses(self, responses: Vec<MockResponse>) -> Self {
        self.responses.lock().await.extend(responses);
        self
    }

    /// Get call counts for verification.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get captured requests for verification.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }
}

#[async_trait]
impl SmershApi for MockSmershApi {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        content_type: &str,
    ) -> Result<Option<Value>> {
        {
            let mut counts = self.call_count.lock().await;
            match method {
                Method::POST => counts.post += 1,
                Method::PATCH => counts.patch += 1,
                Method::DELETE => counts.delete += 1,
                _ => counts.get += 1,
            }
        }

        self.captured_requests.lock().await.push(CapturedRequest {
            method,
            path: path.to_string(),
            body,
            content_type: content_type.to_string(),
        });

        match self.responses.lock().await.pop_front() {
            None | Some(MockResponse::Empty) => Ok(None),
            Some(MockResponse::Body(value)) => Ok(Some(clean_ldjson(value))),
            Some(MockResponse::Rejected(description)) => {
                Err(ApiError::ValidationRejected(description).into())
            }
            Some(MockResponse::Status(code)) => {
                let status = StatusCode::from_u16(code)
                    .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

                match status_error(status, path, "") {
                    Some(err) => Err(err.into()),
                    None => Ok(None),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_normalizes_and_counts() {
        let api = MockSmershApi::new()
            .with_responses(vec![
                MockResponse::body(json!({ "@id": "/api/users/4", "firstName": "A" })),
                MockResponse::Empty,
            ])
            .await;

        let first = api.get("/api/users/4").await.unwrap();
        assert_eq!(first, Some(json!({ "id": "4", "first_name": "A" })));

        let second = api.delete("/api/users/4").await.unwrap();
        assert_eq!(second, None);

        let counts = api.call_counts().await;
        assert_eq!(counts.get, 1);
        assert_eq!(counts.delete, 1);
        assert_eq!(counts.total(), 2);
    }

    #[tokio::test]
    async fn test_mock_status_mapping() {
        let api = MockSmershApi::new()
            .with_responses(vec![MockResponse::Status(500), MockResponse::Status(405)])
            .await;

        let err = api.get("/api/missions").await.unwrap_err();
        assert!(matches!(err, crate::error::Error::Api(ApiError::ServerError(_))));

        let err = api.get("/api/missions").await.unwrap_err();
        assert!(matches!(err, crate::error::Error::Api(ApiError::MethodNotAllowed(_))));
    }
}
