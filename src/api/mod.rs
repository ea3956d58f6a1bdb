//! Content API module.
//!
//! This module provides:
//! - HTTP client holding the credential headers
//! - Endpoint descriptors for the paged-collection engine
//! - Typed views over the opaque item records the API returns

pub mod client;
pub mod endpoint;
pub mod endpoints;
pub mod types;

pub use client::{ApiClient, DEFAULT_ORIGIN};
pub use endpoint::Endpoint;
pub use types::*;
