//! Destination path derivation for downloaded media.
//!
//! The derived path doubles as the idempotence ledger: a file existing at the
//! destination means the media was already downloaded.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::api::types::MediaDescriptor;
use crate::error::Result;
use crate::fs::naming::sanitize_path_component;

/// Subdirectory routing based on file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
    Other,
}

impl MediaKind {
    pub fn from_filename(name: &str) -> Self {
        let extension = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
        match extension.as_str() {
            "mp4" | "m4v" | "mov" | "webm" => MediaKind::Video,
            "jpg" | "jpeg" | "png" | "gif" | "webp" => MediaKind::Image,
            _ => MediaKind::Other,
        }
    }

    /// Subdirectory under the account folder; `None` keeps the file at the
    /// folder root.
    pub fn folder_name(&self) -> Option<&'static str> {
        match self {
            MediaKind::Video => Some("vid"),
            MediaKind::Image => Some("pic"),
            MediaKind::Other => None,
        }
    }
}

/// Base folder for one account's downloads.
pub fn account_folder(root: &Path, username: &str) -> Result<PathBuf> {
    Ok(root.join(sanitize_path_component(username)?))
}

/// Full destination path for a descriptor under an account folder, or `None`
/// when no source filename can be derived.
///
/// `subdir_prefix` distinguishes conversation media (`msg_vid`, `msg_pic`)
/// from timeline media (`vid`, `pic`).
pub fn destination_path(
    folder: &Path,
    subdir_prefix: &str,
    descriptor: &MediaDescriptor,
) -> Option<PathBuf> {
    let source_name = source_filename(descriptor)?;
    let file_name = format!(
        "{}_{}",
        timestamp_prefix(descriptor.created_at),
        source_name
    );

    match MediaKind::from_filename(&source_name).folder_name() {
        Some(subdir) => Some(
            folder
                .join(format!("{}{}", subdir_prefix, subdir))
                .join(file_name),
        ),
        None => Some(folder.join(file_name)),
    }
}

/// CDN filename for a descriptor: the explicit `filename` field, else the
/// last path segment of the raw `location` field, else of the first download
/// location.
pub fn source_filename(descriptor: &MediaDescriptor) -> Option<String> {
    if let Some(name) = descriptor.filename.as_deref() {
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    descriptor
        .location
        .as_deref()
        .or_else(|| descriptor.locations.first().map(|l| l.location.as_str()))
        .and_then(last_path_segment)
}

/// `YYYYMMDD_HHMMSS` UTC prefix derived from the descriptor timestamp.
pub fn timestamp_prefix(created_at: i64) -> String {
    let timestamp =
        DateTime::<Utc>::from_timestamp(created_at, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    timestamp.format("%Y%m%d_%H%M%S").to_string()
}

fn last_path_segment(raw: &str) -> Option<String> {
    let path = raw.split('?').next().unwrap_or(raw);
    let segment = path.rsplit('/').next()?;
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::MediaLocation;

    fn descriptor(filename: Option<&str>, location: Option<&str>, created_at: i64) -> MediaDescriptor {
        MediaDescriptor {
            locations: vec![MediaLocation {
                location: "https://cdn.example.com/a/b/fallback.bin?sig=x".to_string(),
            }],
            filename: filename.map(str::to_string),
            location: location.map(str::to_string),
            created_at,
        }
    }

    #[test]
    fn video_goes_under_vid_with_timestamp_prefix() {
        // 2021-05-01 12:30:45 UTC
        let d = descriptor(Some("clip.mp4"), None, 1619872245);
        let path = destination_path(Path::new("/dl/alice"), "", &d).unwrap();
        assert_eq!(path, PathBuf::from("/dl/alice/vid/20210501_123045_clip.mp4"));
    }

    #[test]
    fn image_goes_under_pic() {
        let d = descriptor(Some("photo.JPG"), None, 0);
        let path = destination_path(Path::new("/dl/alice"), "", &d).unwrap();
        assert_eq!(path, PathBuf::from("/dl/alice/pic/19700101_000000_photo.JPG"));
    }

    #[test]
    fn conversation_media_gets_prefixed_subdir() {
        let d = descriptor(Some("photo.png"), None, 0);
        let path = destination_path(Path::new("/dl/alice"), "msg_", &d).unwrap();
        assert_eq!(
            path,
            PathBuf::from("/dl/alice/msg_pic/19700101_000000_photo.png")
        );
    }

    #[test]
    fn unknown_extensions_stay_at_the_folder_root() {
        let d = descriptor(Some("notes.txt"), None, 0);
        let path = destination_path(Path::new("/dl/alice"), "", &d).unwrap();
        assert_eq!(path, PathBuf::from("/dl/alice/19700101_000000_notes.txt"));
    }

    #[test]
    fn filename_falls_back_to_raw_location_segment() {
        let d = descriptor(None, Some("media/2021/05/beach.gif"), 0);
        assert_eq!(source_filename(&d).unwrap(), "beach.gif");
    }

    #[test]
    fn filename_falls_back_to_first_download_location() {
        let d = descriptor(None, None, 0);
        assert_eq!(source_filename(&d).unwrap(), "fallback.bin");
    }

    #[test]
    fn no_derivable_filename_yields_none() {
        let d = MediaDescriptor::default();
        assert!(destination_path(Path::new("/dl/alice"), "", &d).is_none());
    }

    #[test]
    fn account_folder_sanitizes_usernames() {
        let folder = account_folder(Path::new("/dl"), "a:b").unwrap();
        assert_eq!(folder, PathBuf::from("/dl/a_b"));
        assert!(account_folder(Path::new("/dl"), "../up").is_err());
    }
}
