//! Paginated collection engine.
//!
//! This module provides:
//! - Lazily-advancing cursors over remote paginated collections
//! - Cross-page accumulated state with typed merge rules

pub mod collection;
pub mod state;

pub use collection::PagedCollection;
pub use state::{AccumulatedState, SubCollection, STATS_KEY};
