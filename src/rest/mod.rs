//! Generic REST resource infrastructure.
//!
//! This module holds the pieces every platform resource shares:
//!
//! - **[`ResourceList`]**: a lazy, restartable, bookmark-paginated listing
//! - **[`ListCursor`]**: one forward pass over a [`ResourceList`]
//! - **[`ResourceError`]**: semantic error types for resource operations
//!
//! Concrete resources such as [`Connectors`](crate::dsc::Connectors) are
//! built on top of these and an [`ApiTransport`](crate::clients::ApiTransport).

mod errors;
mod list;

pub use errors::ResourceError;
pub use list::{ListCursor, ResourceList, BOOKMARK_PARAM};
