//! The historian connector record.
//!
//! A [`Connector`] is a read-only view of one connector as the server
//! returned it. It is never mutated after decoding; changes go through
//! [`Connectors::update`](crate::dsc::Connectors::update).
//!
//! # Example
//!
//! ```rust,ignore
//! let connector = connectors.get("0f8a2c6e").await?;
//!
//! println!("{} ({})", connector.id(), connector.connector_type()?);
//! if let Some(config) = connector.configuration() {
//!     println!("configured with {config}");
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::rest::ResourceError;

/// Resource name used in errors.
pub(crate) const RESOURCE: &str = "Connector";

/// A historian connector as returned by the platform.
///
/// Only `id` is required when decoding. The fields the server contract
/// always provides (`type`, `serviceId`, `adminDisabled`, `enabled`,
/// `timezone`) have accessors that fail with
/// [`ResourceError::MissingField`] when the server left them out.
///
/// Fields this type does not model are kept in [`Connector::extra`] and
/// written back out on serialization. Timestamps are kept as the server
/// sent them and parsed on access, so an odd timestamp never stops a
/// record from decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Connector {
    id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// Raw service tag; kept as a string so unknown tags still decode.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    connector_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    service_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin_disabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    configuration: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    created: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_by: Option<String>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

// Verify Connector is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Connector>();
};

impl Connector {
    /// Decodes a connector from a response body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Json`] if the body is not an object, has no
    /// `id`, or a known field has the wrong JSON type.
    pub fn from_value(value: Value) -> Result<Self, ResourceError> {
        serde_json::from_value(value).map_err(|source| ResourceError::Json {
            resource: RESOURCE,
            source,
        })
    }

    /// The connector's unique id (a UUID assigned by the server).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The storage service tag, e.g. `cloudant` or `eventstreams`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if `type` was absent.
    pub fn connector_type(&self) -> Result<&str, ResourceError> {
        required(self.connector_type.as_deref(), "type")
    }

    /// Id of the service the connector writes to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if `serviceId` was absent.
    pub fn service_id(&self) -> Result<&str, ResourceError> {
        required(self.service_id.as_deref(), "serviceId")
    }

    /// Whether an administrator has disabled the connector.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if `adminDisabled` was absent.
    pub fn admin_disabled(&self) -> Result<bool, ResourceError> {
        required(self.admin_disabled, "adminDisabled")
    }

    /// Whether the connector is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if `enabled` was absent.
    pub fn enabled(&self) -> Result<bool, ResourceError> {
        required(self.enabled, "enabled")
    }

    /// Timezone used when bucketing stored data.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingField`] if `timezone` was absent.
    pub fn timezone(&self) -> Result<&str, ResourceError> {
        required(self.timezone.as_deref(), "timezone")
    }

    /// Service-specific configuration, if the server returned any.
    #[must_use]
    pub const fn configuration(&self) -> Option<&Value> {
        self.configuration.as_ref()
    }

    /// Creation time, if present and parseable.
    #[must_use]
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created.as_deref().and_then(parse_timestamp)
    }

    #[must_use]
    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    /// Last update time, if present and parseable.
    #[must_use]
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated.as_deref().and_then(parse_timestamp)
    }

    #[must_use]
    pub fn updated_by(&self) -> Option<&str> {
        self.updated_by.as_deref()
    }

    /// Server fields not modelled by this type.
    #[must_use]
    pub const fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Looks up an unmodelled server field by its JSON key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Parses an ISO 8601 timestamp. A missing offset is read as UTC and a
/// bare date as midnight UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn required<V>(value: Option<V>, field: &'static str) -> Result<V, ResourceError> {
    value.ok_or(ResourceError::MissingField {
        resource: RESOURCE,
        field,
    })
}

/// Storage services a connector can target.
///
/// The server is the authority on valid tags; this enum covers the ones
/// the platform documents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorType {
    /// IBM Cloudant.
    Cloudant,
    /// IBM Event Streams.
    EventStreams,
    /// Db2 Warehouse.
    Db2,
    /// PostgreSQL.
    Postgres,
}

impl ConnectorType {
    /// Returns the wire tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cloudant => "cloudant",
            Self::EventStreams => "eventstreams",
            Self::Db2 => "db2",
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ConnectorType> for String {
    fn from(connector_type: ConnectorType) -> Self {
        connector_type.as_str().to_string()
    }
}

/// Error returned when a string is not a known connector type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown connector type '{0}'. Expected one of: cloudant, eventstreams, db2, postgres")]
pub struct ParseConnectorTypeError(pub String);

impl FromStr for ConnectorType {
    type Err = ParseConnectorTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloudant" => Ok(Self::Cloudant),
            "eventstreams" => Ok(Self::EventStreams),
            "db2" => Ok(Self::Db2),
            "postgres" => Ok(Self::Postgres),
            _ => Err(ParseConnectorTypeError(s.to_string())),
        }
    }
}
