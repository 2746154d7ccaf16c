//! # Historian Connector API client
//!
//! An async Rust client for the IoT platform's historian connector REST
//! resource (`api/v0002/historianconnectors`). Connectors stream an
//! organization's device data into an external storage service such as
//! Cloudant or Event Streams.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`PlatformConfig`] and [`PlatformConfigBuilder`]
//! - Validated newtypes for credentials and endpoints
//! - An async HTTP client with basic authentication ([`HttpClient`])
//! - The [`ApiTransport`] seam the resource layer is written against
//! - Lazy, bookmark-paginated listings ([`rest::ResourceList`])
//! - Connector operations: find, create, update, get, contains, delete ([`dsc::Connectors`])
//!
//! ## Quick Start
//!
//! ```rust
//! use wiotp_historian::{ApiKey, AuthToken, PlatformConfig};
//!
//! let config = PlatformConfig::builder()
//!     .api_key(ApiKey::new("a-ab12cd-xyzzy1").unwrap())
//!     .auth_token(AuthToken::new("secret-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.org_id().as_ref(), "ab12cd");
//! assert_eq!(config.base_url(), "https://ab12cd.internetofthings.ibmcloud.com");
//! ```
//!
//! ## Working with Connectors
//!
//! ```rust,ignore
//! use wiotp_historian::dsc::{ConnectorDefinition, ConnectorFilter, ConnectorType, Connectors};
//! use wiotp_historian::{HttpClient, PlatformConfig};
//!
//! let client = HttpClient::new(&PlatformConfig::from_env()?);
//! let connectors = Connectors::new(&client);
//!
//! // Create
//! let definition = ConnectorDefinition::new("archive", ConnectorType::Cloudant, "svc-1")
//!     .timezone("Europe/London");
//! let connector = connectors.create(&definition).await?;
//!
//! // Update (full replacement)
//! let connector = connectors
//!     .update(connector.id(), &definition.description("Long term storage"))
//!     .await?;
//!
//! // Find, one page at a time behind the scenes
//! let enabled = connectors.find(&ConnectorFilter::new().enabled(true));
//! for connector in enabled.collect().await? {
//!     println!("{} -> {}", connector.id(), connector.service_id()?);
//! }
//! ```
//!
//! ## Errors
//!
//! Configuration problems are [`ConfigError`]s. Every resource operation
//! returns [`rest::ResourceError`]; an unexpected HTTP status is
//! [`rest::ResourceError::Api`], which carries the raw response.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (requests, page fetches, writes) and
//! installs no subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration and transport are passed explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Thread-safe**: clients and records are `Send + Sync`
//! - **No retries**: a failed request surfaces immediately

pub mod clients;
pub mod config;
pub mod dsc;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, AuthToken, BaseUrl, OrgId, PlatformConfig, PlatformConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiTransport, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, HttpResponseError, InvalidHttpRequestError,
};

// Re-export resource types
pub use dsc::{Connector, ConnectorDefinition, ConnectorFilter, ConnectorType, Connectors};
pub use rest::{ListCursor, ResourceError, ResourceList};
