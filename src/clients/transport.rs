//! The transport seam consumed by the resource layer.
//!
//! [`ApiTransport`] is the only thing [`Connectors`](crate::dsc::Connectors)
//! and [`ResourceList`](crate::rest::ResourceList) need from the network.
//! [`HttpClient`](crate::clients::HttpClient) is the production
//! implementation; tests substitute a recording mock.
//!
//! Implementations return every HTTP status as an [`HttpResponse`]. Only
//! failures to produce a response at all are [`HttpError`]s.

use std::collections::HashMap;

use crate::clients::{HttpError, HttpResponse};

/// Minimal verb-level HTTP interface.
///
/// Paths are relative to the platform base URL (e.g.
/// `api/v0002/historianconnectors`).
#[allow(async_fn_in_trait)]
pub trait ApiTransport: Send + Sync {
    /// Sends a GET request with optional query parameters.
    async fn get(
        &self,
        path: &str,
        query: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError>;

    /// Sends a POST request with a JSON body.
    async fn post(&self, path: &str, body: serde_json::Value) -> Result<HttpResponse, HttpError>;

    /// Sends a PUT request with a JSON body.
    async fn put(&self, path: &str, body: serde_json::Value) -> Result<HttpResponse, HttpError>;

    /// Sends a DELETE request.
    async fn delete(&self, path: &str) -> Result<HttpResponse, HttpError>;
}
