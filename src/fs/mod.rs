//! Filesystem module.
//!
//! Provides:
//! - Destination path derivation for downloaded media
//! - Path component sanitization

pub mod naming;
pub mod paths;

pub use naming::sanitize_path_component;
pub use paths::{account_folder, destination_path, MediaKind};
