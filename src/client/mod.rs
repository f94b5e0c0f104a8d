//! SMERSH API client
//!
//! [`SmershApi`] is the transport seam: one call, one HTTP round-trip, the
//! response already normalized by [`wire::clean_ldjson`]. Typed resources in
//! [`models`] are decoded from, and exported to, what flows through it.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::Result;

pub mod case;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod smersh;
pub mod wire;

#[cfg(test)]
pub use mock::MockSmershApi;
pub use smersh::SmershClient;

/// Media type of JSON-LD requests and responses
pub const LD_JSON: &str = "application/ld+json";

/// Media type of partial updates
pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// SMERSH API transport
///
/// `Ok(None)` means the call succeeded without a usable body (204, empty or
/// non-JSON answer). HTTP failures come back as [`crate::error::ApiError`].
#[async_trait]
pub trait SmershApi: Send + Sync {
    /// Issue one request against `path` (relative to the server root).
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        content_type: &str,
    ) -> Result<Option<Value>>;

    /// GET a collection or an item
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        self.request(Method::GET, path, None, LD_JSON).await
    }

    /// POST a new resource
    async fn post(&self, path: &str, body: Value) -> Result<Option<Value>> {
        self.request(Method::POST, path, Some(body), LD_JSON).await
    }

    /// PATCH an existing resource with merge-patch semantics
    async fn patch(&self, path: &str, body: Value) -> Result<Option<Value>> {
        self.request(Method::PATCH, path, Some(body), MERGE_PATCH_JSON)
            .await
    }

    /// DELETE a resource
    async fn delete(&self, path: &str) -> Result<Option<Value>> {
        self.request(Method::DELETE, path, None, LD_JSON).await
    }
}
