//! Resource-level error types.
//!
//! - **Unexpected status**: [`ResourceError::Api`] - carries the raw response
//! - **404 on lookups**: [`ResourceError::NotFound`] - only for `get`/`delete`
//! - **Absent required field**: [`ResourceError::MissingField`]
//! - **Malformed body**: [`ResourceError::Json`]
//! - **Transport failure**: [`ResourceError::Http`]
//!
//! # Example
//!
//! ```rust,ignore
//! use wiotp_historian::rest::ResourceError;
//!
//! match connectors.create(&definition).await {
//!     Ok(connector) => println!("Created {}", connector.id()),
//!     Err(ResourceError::Api(e)) => println!("Rejected with {}: {}", e.code, e.body),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpError, HttpResponse, HttpResponseError};

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The server answered with a status other than the one the operation expects.
    ///
    /// 4xx and 5xx are not distinguished; inspect the carried response.
    #[error(transparent)]
    Api(#[from] HttpResponseError),

    /// The resource does not exist (HTTP 404 on a lookup by id).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "Connector").
        resource: &'static str,
        /// The id that was requested.
        id: String,
    },

    /// A field the server contract requires was absent from the resource.
    #[error("{resource} is missing required field '{field}'")]
    MissingField {
        /// The type name of the resource.
        resource: &'static str,
        /// The JSON key that was absent.
        field: &'static str,
    },

    /// A body or parameter set could not be converted to or from JSON.
    #[error("Failed to convert {resource} JSON: {source}")]
    Json {
        /// The type name of what was being converted.
        resource: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be sent or no response was received.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Wraps a response whose status did not match the expected one.
    #[must_use]
    pub fn from_http_response(response: HttpResponse) -> Self {
        Self::Api(HttpResponseError::from_response(response))
    }

    /// Returns the HTTP status code when this error carries a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.code),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Returns the request id if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api(e) => e.request_id.as_deref(),
            _ => None,
        }
    }
}
