//! Endpoint descriptors for the paged-collection engine.

/// Immutable description of one collection endpoint.
///
/// The primary sub-collection drives both cursor advancement and iteration;
/// every other sub-collection in a page is merged into the accumulated state
/// as opaque side data.
#[derive(Debug, Clone)]
pub struct Endpoint {
    path: String,
    primary: String,
    envelope: bool,
    paged: bool,
    offset_field: String,
    id_field: String,
}

impl Endpoint {
    /// New enveloped, paged endpoint with the usual `before`/`id` cursor pair.
    pub fn new(path: impl Into<String>, primary: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            primary: primary.into(),
            envelope: true,
            paged: true,
            offset_field: "before".to_string(),
            id_field: "id".to_string(),
        }
    }

    /// Mark the collection as delivered whole in a single page.
    pub fn unpaged(mut self) -> Self {
        self.paged = false;
        self
    }

    /// Mark the sub-collections as sitting at the top level of the body
    /// instead of under a `response` envelope.
    pub fn top_level(mut self) -> Self {
        self.envelope = false;
        self
    }

    /// Override the cursor query parameter name.
    pub fn with_offset_field(mut self, name: impl Into<String>) -> Self {
        self.offset_field = name.into();
        self
    }

    /// Override the item field the next cursor value is derived from.
    pub fn with_id_field(mut self, name: impl Into<String>) -> Self {
        self.id_field = name.into();
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn is_paged(&self) -> bool {
        self.paged
    }

    pub fn has_envelope(&self) -> bool {
        self.envelope
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Full request path with the cursor parameters appended.
    ///
    /// The fixed `after=0` is a source-API idiosyncrasy: only the offset
    /// bound varies between pages.
    pub fn page_path(&self, cursor: u64) -> String {
        let delimiter = if self.path.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}&after=0",
            self.path, delimiter, self.offset_field, cursor
        )
    }
}
