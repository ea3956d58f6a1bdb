//! Fansly Archiver - incremental media archiver for subscribed accounts.
//!
//! This library walks the paginated collection endpoints of the content API
//! (subscriptions, timelines, message groups, message history), resolves
//! attachment references into concrete media descriptors and downloads
//! whatever is not already on disk.
//!
//! # Features
//!
//! - Lazy, pull-based pagination with cross-page state accumulation
//! - Attachment resolution through media bundles or direct containers
//! - Idempotent downloads keyed on the derived destination path
//! - Optional quick-fetch early stop once known content is reached
//!
//! # Example
//!
//! ```no_run
//! use fansly_archiver::api::{endpoints, ApiClient};
//! use fansly_archiver::paging::PagedCollection;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = ApiClient::new("https://apiv3.fansly.com", "token", "user-agent")?;
//!
//!     let subscriptions = PagedCollection::open(&api, endpoints::subscriptions())
//!         .await?
//!         .fetch_all()
//!         .await?;
//!     println!("{} subscriptions", subscriptions.sequence_len("subscriptions"));
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod paging;

// Re-exports for convenience
pub use api::{ApiClient, Endpoint};
pub use config::Config;
pub use download::{
    download_media, download_messages, download_timeline, DownloadState, GlobalState, Outcome,
};
pub use error::{Error, Result};
pub use paging::{AccumulatedState, PagedCollection};
