//! Download module for content downloading.
//!
//! This module provides:
//! - Idempotent media file downloading
//! - Timeline walking
//! - Message history walking
//! - Download statistics tracking

pub mod media;
pub mod messages;
pub mod state;
pub mod timeline;

pub use media::{download_media, Outcome};
pub use messages::download_messages;
pub use state::{DownloadState, GlobalState};
pub use timeline::download_timeline;
