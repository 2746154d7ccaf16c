//! Data store connector (historian) resources.
//!
//! - [`Connectors`]: find, create, update, get, contains and delete connectors
//! - [`Connector`]: an immutable connector record
//! - [`ConnectorList`]: a lazy, paginated listing of connectors
//! - [`ConnectorFilter`] and [`ConnectorDefinition`]: inputs to `find` and `create`/`update`
//!
//! Destinations and forwarding rules of a connector are not covered.

mod connector;
mod connectors;

pub use connector::{Connector, ConnectorType, ParseConnectorTypeError};
pub use connectors::{
    ConnectorDefinition, ConnectorFilter, ConnectorList, Connectors, CONNECTORS_PATH,
};
