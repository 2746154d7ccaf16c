//! The historian connector collection.
//!
//! [`Connectors`] is not an in-memory collection: every method is a single
//! remote call (or, for listings, one call per page) against
//! `api/v0002/historianconnectors`.
//!
//! Each operation accepts exactly one success status. Anything else comes
//! back as [`ResourceError::Api`] carrying the raw response, except that
//! lookups by id map 404 to [`ResourceError::NotFound`].
//!
//! # Example
//!
//! ```rust,ignore
//! use wiotp_historian::dsc::{ConnectorDefinition, ConnectorFilter, ConnectorType, Connectors};
//! use wiotp_historian::{HttpClient, PlatformConfig};
//!
//! let client = HttpClient::new(&PlatformConfig::from_env()?);
//! let connectors = Connectors::new(&client);
//!
//! let definition = ConnectorDefinition::new("archive", ConnectorType::Cloudant, "svc-1")
//!     .description("Long term storage")
//!     .timezone("Europe/London");
//! let created = connectors.create(&definition).await?;
//!
//! let enabled = connectors.find(&ConnectorFilter::new().enabled(true));
//! let mut cursor = enabled.cursor();
//! while let Some(connector) = cursor.next().await {
//!     println!("{}", connector?.id());
//! }
//! ```

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::clients::{ApiTransport, HttpResponse};
use crate::dsc::connector::{Connector, RESOURCE};
use crate::rest::{ResourceError, ResourceList};

/// Path of the connector collection, relative to the platform base URL.
pub const CONNECTORS_PATH: &str = "api/v0002/historianconnectors";

/// A lazy listing of connectors.
pub type ConnectorList<'a, T> = ResourceList<'a, T, Connector>;

/// Filters for [`Connectors::find`].
///
/// Unset filters are not sent. The server validates the values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorFilter {
    pub name: Option<String>,
    pub connector_type: Option<String>,
    pub enabled: Option<bool>,
    pub service_id: Option<String>,
}

impl ConnectorFilter {
    /// Creates a filter that matches every connector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches connectors with this name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Matches connectors of this type.
    ///
    /// Accepts a [`ConnectorType`](crate::dsc::ConnectorType) or any raw tag string.
    #[must_use]
    pub fn connector_type(mut self, connector_type: impl Into<String>) -> Self {
        self.connector_type = Some(connector_type.into());
        self
    }

    /// Matches connectors whose `enabled` flag equals `enabled`.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Matches connectors writing to this service.
    #[must_use]
    pub fn service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = Some(service_id.into());
        self
    }

    /// Renders the filter as query parameters (`name`, `type`, `enabled`, `serviceId`).
    #[must_use]
    pub fn to_query(&self) -> HashMap<String, String> {
        let mut query = HashMap::new();
        if let Some(name) = &self.name {
            query.insert("name".to_string(), name.clone());
        }
        if let Some(connector_type) = &self.connector_type {
            query.insert("type".to_string(), connector_type.clone());
        }
        if let Some(enabled) = self.enabled {
            query.insert("enabled".to_string(), enabled.to_string());
        }
        if let Some(service_id) = &self.service_id {
            query.insert("serviceId".to_string(), service_id.clone());
        }
        query
    }
}

/// The writable fields of a connector, sent by `create` and `update`.
///
/// `update` replaces the whole connector, so every field is sent.
/// `configuration` is left out of the body when `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorDefinition {
    pub name: String,

    #[serde(rename = "type")]
    pub connector_type: String,

    pub service_id: String,

    /// An empty description removes the existing one on update.
    pub description: String,

    pub timezone: String,

    pub enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Value>,
}

impl ConnectorDefinition {
    /// Creates a definition with an empty description, timezone `UTC`,
    /// enabled, and no configuration.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        connector_type: impl Into<String>,
        service_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            connector_type: connector_type.into(),
            service_id: service_id.into(),
            description: String::new(),
            timezone: "UTC".to_string(),
            enabled: true,
            configuration: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the service-specific configuration object.
    #[must_use]
    pub fn configuration(mut self, configuration: Value) -> Self {
        self.configuration = Some(configuration);
        self
    }
}

#[derive(Serialize)]
struct UpdateBody<'d> {
    id: &'d str,
    #[serde(flatten)]
    definition: &'d ConnectorDefinition,
}

/// Operations on the historian connectors of an organization.
///
/// Holds only the transport; cheap to create per use.
#[derive(Debug)]
pub struct Connectors<'a, T> {
    transport: &'a T,
}

impl<'a, T: ApiTransport> Connectors<'a, T> {
    /// Creates a connector collection backed by `transport`.
    #[must_use]
    pub const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Returns a lazy listing of connectors matching `filter`.
    ///
    /// No request is made until the listing is enumerated. Results are
    /// unordered; this resource does not support sorting.
    #[must_use]
    pub fn find(&self, filter: &ConnectorFilter) -> ConnectorList<'a, T> {
        ResourceList::new(self.transport, RESOURCE, CONNECTORS_PATH, filter.to_query())
    }

    /// Returns a lazy listing of every connector.
    #[must_use]
    pub fn list(&self) -> ConnectorList<'a, T> {
        ResourceList::new(self.transport, RESOURCE, CONNECTORS_PATH, HashMap::new())
    }

    /// Creates a connector.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] unless the server answers 201.
    pub async fn create(&self, definition: &ConnectorDefinition) -> Result<Connector, ResourceError> {
        let body = to_body(definition)?;
        let response = self.transport.post(CONNECTORS_PATH, body).await?;
        let connector = expect_connector(response, 201)?;

        tracing::debug!(id = %connector.id(), "Created connector");
        Ok(connector)
    }

    /// Replaces the connector `connector_id` with `definition`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] unless the server answers 200.
    pub async fn update(
        &self,
        connector_id: &str,
        definition: &ConnectorDefinition,
    ) -> Result<Connector, ResourceError> {
        let body = to_body(&UpdateBody {
            id: connector_id,
            definition,
        })?;
        let response = self.transport.put(&item_path(connector_id), body).await?;
        let connector = expect_connector(response, 200)?;

        tracing::debug!(id = %connector.id(), "Updated connector");
        Ok(connector)
    }

    /// Fetches one connector by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] on 404 and
    /// [`ResourceError::Api`] on any other status than 200.
    pub async fn get(&self, connector_id: &str) -> Result<Connector, ResourceError> {
        let response = self.transport.get(&item_path(connector_id), None).await?;
        if response.code == 404 {
            return Err(not_found(connector_id));
        }
        expect_connector(response, 200)
    }

    /// Returns whether a connector with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Api`] on any status other than 200 or 404.
    pub async fn contains(&self, connector_id: &str) -> Result<bool, ResourceError> {
        let response = self.transport.get(&item_path(connector_id), None).await?;
        match response.code {
            200 => Ok(true),
            404 => Ok(false),
            _ => Err(ResourceError::from_http_response(response)),
        }
    }

    /// Deletes a connector.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] on 404 and
    /// [`ResourceError::Api`] on any other status than 204.
    pub async fn delete(&self, connector_id: &str) -> Result<(), ResourceError> {
        let response = self.transport.delete(&item_path(connector_id)).await?;
        match response.code {
            204 => {
                tracing::debug!(id = %connector_id, "Deleted connector");
                Ok(())
            }
            404 => Err(not_found(connector_id)),
            _ => Err(ResourceError::from_http_response(response)),
        }
    }
}

fn item_path(connector_id: &str) -> String {
    format!("{CONNECTORS_PATH}/{}", urlencoding::encode(connector_id))
}

fn not_found(connector_id: &str) -> ResourceError {
    ResourceError::NotFound {
        resource: RESOURCE,
        id: connector_id.to_string(),
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<Value, ResourceError> {
    serde_json::to_value(body).map_err(|source| ResourceError::Json {
        resource: RESOURCE,
        source,
    })
}

fn expect_connector(response: HttpResponse, expected: u16) -> Result<Connector, ResourceError> {
    if response.code != expected {
        return Err(ResourceError::from_http_response(response));
    }
    Connector::from_value(response.body)
}
