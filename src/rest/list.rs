//! Lazy, bookmark-driven listing of remote resources.
//!
//! A [`ResourceList`] describes a query (path plus filter parameters) and
//! performs no I/O by itself. Each call to [`ResourceList::cursor`] or
//! [`ResourceList::stream`] starts a fresh enumeration from the first page,
//! so a list can be walked any number of times.
//!
//! # Wire format
//!
//! Every page is a `GET` on the list path with the filter parameters plus
//! `bookmark=<token>` from the previous page (absent on the first request).
//! The expected response (HTTP 200) is:
//!
//! ```json
//! { "results": [ ... ], "bookmark": "g1AAAA...", "meta": { "total_rows": 42 } }
//! ```
//!
//! `results` is required; a 200 page without it (or a body that is not
//! JSON) fails with [`ResourceError::Json`]. No `limit` is sent, so pages
//! hold the server default of 25 items.
//!
//! A page without `bookmark` is the last one. So is an empty page, or one
//! that hands back the bookmark that was just sent.
//!
//! Ordering is whatever the server returns; this resource type cannot be
//! sorted. Pages are not a consistent snapshot if the data changes while
//! enumerating.
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//!
//! let list = connectors.find(&ConnectorFilter::new().enabled(true));
//!
//! // Pull items one at a time
//! let mut cursor = list.cursor();
//! while let Some(connector) = cursor.next().await {
//!     println!("{}", connector?.id());
//! }
//!
//! // Or as a stream, starting over from page one
//! let ids: Vec<String> = list
//!     .stream()
//!     .map_ok(|c| c.id().to_string())
//!     .try_collect()
//!     .await?;
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::marker::PhantomData;

use futures::Stream;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::clients::ApiTransport;
use crate::rest::ResourceError;

/// Query parameter carrying the bookmark of the previous page.
pub const BOOKMARK_PARAM: &str = "bookmark";

/// One page of a listing as returned by the server.
#[derive(Debug, Deserialize)]
#[serde(bound = "R: DeserializeOwned")]
struct Page<R> {
    results: Vec<R>,
    #[serde(default)]
    bookmark: Option<String>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

#[derive(Debug, Default, Deserialize)]
struct PageMeta {
    #[serde(default)]
    total_rows: Option<u64>,
}

/// A lazily fetched, restartable sequence of remote resources.
///
/// # Type Parameters
///
/// * `T` - The transport used to fetch pages
/// * `R` - The item type each element of `results` decodes into
pub struct ResourceList<'a, T, R> {
    transport: &'a T,
    resource: &'static str,
    path: String,
    filters: HashMap<String, String>,
    _item: PhantomData<fn() -> R>,
}

impl<T, R> fmt::Debug for ResourceList<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceList")
            .field("resource", &self.resource)
            .field("path", &self.path)
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

impl<T, R> Clone for ResourceList<'_, T, R> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport,
            resource: self.resource,
            path: self.path.clone(),
            filters: self.filters.clone(),
            _item: PhantomData,
        }
    }
}

impl<'a, T, R> ResourceList<'a, T, R>
where
    T: ApiTransport,
    R: DeserializeOwned,
{
    /// Creates a list over `path` filtered by `filters`.
    ///
    /// `resource` names the item type in errors (e.g. "Connector").
    #[must_use]
    pub fn new(
        transport: &'a T,
        resource: &'static str,
        path: impl Into<String>,
        filters: HashMap<String, String>,
    ) -> Self {
        Self {
            transport,
            resource,
            path: path.into(),
            filters,
            _item: PhantomData,
        }
    }

    /// Returns the path pages are fetched from.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the filter parameters sent with every page request.
    #[must_use]
    pub const fn filters(&self) -> &HashMap<String, String> {
        &self.filters
    }

    /// Starts a new enumeration from the first page.
    #[must_use]
    pub fn cursor(&self) -> ListCursor<'a, T, R> {
        ListCursor {
            transport: self.transport,
            resource: self.resource,
            path: self.path.clone(),
            filters: self.filters.clone(),
            buffer: VecDeque::new(),
            bookmark: None,
            finished: false,
            pages_fetched: 0,
            total_rows: None,
        }
    }

    /// Starts a new enumeration from the first page, as a [`Stream`].
    ///
    /// The stream ends after the first error.
    pub fn stream(&self) -> impl Stream<Item = Result<R, ResourceError>> + 'a
    where
        R: 'a,
    {
        self.cursor().into_stream()
    }

    /// Fetches every page and collects all items.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; items from earlier pages are
    /// discarded.
    pub async fn collect(&self) -> Result<Vec<R>, ResourceError> {
        let mut cursor = self.cursor();
        let mut items = Vec::new();
        while let Some(item) = cursor.next().await {
            items.push(item?);
        }
        Ok(items)
    }
}

/// A single forward-only pass over a [`ResourceList`].
///
/// Holds at most one page of items in memory.
pub struct ListCursor<'a, T, R> {
    transport: &'a T,
    resource: &'static str,
    path: String,
    filters: HashMap<String, String>,
    buffer: VecDeque<R>,
    bookmark: Option<String>,
    finished: bool,
    pages_fetched: u32,
    total_rows: Option<u64>,
}

impl<T, R> fmt::Debug for ListCursor<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListCursor")
            .field("resource", &self.resource)
            .field("path", &self.path)
            .field("buffered", &self.buffer.len())
            .field("bookmark", &self.bookmark)
            .field("finished", &self.finished)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}

impl<'a, T, R> ListCursor<'a, T, R>
where
    T: ApiTransport,
    R: DeserializeOwned,
{
    /// Returns the next item, fetching the next page when the current one is used up.
    ///
    /// Returns `None` once the listing is exhausted. After an error the
    /// cursor is finished and keeps returning `None`.
    pub async fn next(&mut self) -> Option<Result<R, ResourceError>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.fetch_page().await {
                self.finished = true;
                return Some(Err(e));
            }
        }
    }

    /// Number of page requests made so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Total matching rows as last reported by the server, if it reports them.
    #[must_use]
    pub const fn total_rows(&self) -> Option<u64> {
        self.total_rows
    }

    /// Converts the cursor into a [`Stream`] of items.
    pub fn into_stream(self) -> impl Stream<Item = Result<R, ResourceError>> + 'a
    where
        R: 'a,
    {
        futures::stream::unfold(self, |mut cursor| async move {
            cursor.next().await.map(|item| (item, cursor))
        })
    }

    async fn fetch_page(&mut self) -> Result<(), ResourceError> {
        let mut query = self.filters.clone();
        if let Some(bookmark) = &self.bookmark {
            query.insert(BOOKMARK_PARAM.to_string(), bookmark.clone());
        }
        let query = if query.is_empty() { None } else { Some(query) };

        let response = self.transport.get(&self.path, query).await?;
        self.pages_fetched += 1;

        if response.code != 200 {
            return Err(ResourceError::from_http_response(response));
        }

        let page: Page<R> =
            serde_json::from_value(response.body).map_err(|source| ResourceError::Json {
                resource: self.resource,
                source,
            })?;

        tracing::debug!(
            path = %self.path,
            page = self.pages_fetched,
            items = page.results.len(),
            has_bookmark = page.bookmark.is_some(),
            "Fetched {} page",
            self.resource
        );

        if let Some(total) = page.meta.and_then(|meta| meta.total_rows) {
            self.total_rows = Some(total);
        }

        let repeated = page.bookmark.is_some() && page.bookmark == self.bookmark;
        if repeated {
            tracing::warn!(
                path = %self.path,
                "Server returned the bookmark it was sent; ending {} listing",
                self.resource
            );
        }

        self.finished = page.results.is_empty() || page.bookmark.is_none() || repeated;
        self.bookmark = page.bookmark;
        self.buffer.extend(page.results);

        Ok(())
    }
}
