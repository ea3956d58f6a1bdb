//! Lazily-advancing cursor over a remote paginated collection.

use serde_json::Value;

use crate::api::{ApiClient, Endpoint};
use crate::error::{Error, Result};
use crate::paging::state::AccumulatedState;

/// A remote paginated collection, fetched page by page on demand.
///
/// Each page's named sub-collections are merged into an [`AccumulatedState`];
/// iteration walks the endpoint's primary sub-collection and fetches the next
/// page only when the buffered items run out. Recoverable fetch problems end
/// iteration; API-reported failures and merge conflicts are fatal.
#[derive(Debug)]
pub struct PagedCollection<'a> {
    api: &'a ApiClient,
    endpoint: Endpoint,
    state: AccumulatedState,
    cursor: u64,
    read_index: usize,
    hit_end: bool,
}

impl<'a> PagedCollection<'a> {
    /// Open a collection and fetch its first page.
    ///
    /// A garbled or empty first page leaves the collection open with nothing
    /// to iterate; only fatal conditions return `Err`.
    pub async fn open(api: &'a ApiClient, endpoint: Endpoint) -> Result<PagedCollection<'a>> {
        let mut collection = Self {
            api,
            endpoint,
            state: AccumulatedState::default(),
            cursor: 0,
            read_index: 0,
            hit_end: false,
        };
        collection.fetch_more().await?;
        Ok(collection)
    }

    /// Everything accumulated so far.
    pub fn state(&self) -> &AccumulatedState {
        &self.state
    }

    /// Current pagination cursor.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    fn buffered_count(&self) -> usize {
        self.state.sequence_len(self.endpoint.primary())
    }

    /// Fetch and merge exactly one page. Returns `Ok(false)` when the call
    /// made no progress, which callers treat as the end of the collection.
    pub async fn fetch_more(&mut self) -> Result<bool> {
        let count_before = self.buffered_count();
        let page_path = self.endpoint.page_path(self.cursor);

        let response = self.api.get_page(&page_path).await?;
        let text = response.text().await?;

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Unparsable page body from {}: {}", page_path, e);
                return Ok(false);
            }
        };

        let Value::Object(mut body) = body else {
            tracing::debug!("Unexpected page body shape from {}", page_path);
            return Ok(false);
        };

        if body.get("success") == Some(&Value::Bool(false)) {
            return Err(Error::Api(format!("Failed to fetch {}", page_path)));
        }
        body.remove("success");

        let page = if self.endpoint.has_envelope() {
            match body.remove("response") {
                Some(Value::Object(inner)) => inner,
                _ => return Ok(false),
            }
        } else {
            body
        };

        // Natural end of pagination: nothing new in the primary sub-collection.
        let primary_items = match page.get(self.endpoint.primary()) {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Ok(false),
        };

        // Next cursor comes from this page's response, not the merged total.
        let last_id = primary_items
            .last()
            .and_then(|item| item_identifier(item, self.endpoint.id_field()));

        self.state.merge_page(page, self.endpoint.path())?;

        let advanced = match last_id {
            Some(id) if id != self.cursor => {
                self.cursor = id;
                true
            }
            _ => false,
        };

        // A page that only repeats already-seen items leaves the cursor in
        // place; stopping here is the authoritative end-of-collection signal.
        Ok(advanced && self.buffered_count() > count_before)
    }

    /// Advance the forward-only iteration by one item.
    ///
    /// Running past the buffered items triggers exactly one [`fetch_more`]
    /// call; a no-progress result ends iteration terminally and later calls
    /// return `Ok(None)` without refetching.
    ///
    /// [`fetch_more`]: PagedCollection::fetch_more
    pub async fn next_item(&mut self) -> Result<Option<Value>> {
        loop {
            if self.read_index < self.buffered_count() {
                let item = self.state.sequence(self.endpoint.primary())[self.read_index].clone();
                self.read_index += 1;
                return Ok(Some(item));
            }

            if self.hit_end || !self.endpoint.is_paged() {
                return Ok(None);
            }

            if !self.fetch_more().await? {
                self.hit_end = true;
                return Ok(None);
            }
        }
    }

    /// Reset the read position over the already-buffered items. Does not
    /// refetch and does not truncate the accumulated state.
    pub fn rewind(&mut self) {
        self.read_index = 0;
    }

    /// Drain the remaining pages and return the merged state. Unpaged
    /// collections return the first fetch's state untouched.
    pub async fn fetch_all(mut self) -> Result<AccumulatedState> {
        if self.endpoint.is_paged() {
            while self.fetch_more().await? {}
        }
        Ok(self.state)
    }
}

/// Identifier of one item record, accepting number and string encodings.
fn item_identifier(item: &Value, id_field: &str) -> Option<u64> {
    match item.get(id_field)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
