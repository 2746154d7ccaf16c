//! HTTP client types for platform API communication.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiTransport`]: The verb-level interface the resource layer consumes
//! - [`HttpClient`]: The reqwest-backed [`ApiTransport`] implementation
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A response from the API, whatever its status
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//!
//! # Example
//!
//! ```rust,ignore
//! use wiotp_historian::clients::{ApiTransport, HttpClient};
//! use wiotp_historian::PlatformConfig;
//!
//! let client = HttpClient::new(&PlatformConfig::from_env()?);
//! let response = client.get("api/v0002/historianconnectors", None).await?;
//! println!("{}: {}", response.code, response.body);
//! ```
//!
//! # Retry Behavior
//!
//! There is none. A failed request surfaces immediately to the caller.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use transport::ApiTransport;

#[cfg(test)]
pub(crate) use transport::mock;
