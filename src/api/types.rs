//! Typed views over the opaque item records the API returns.
//!
//! The paging engine passes records through untyped; these structs decode
//! only the fields the archiver acts on, at the seams where it acts on them.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Sub-collection holding media containers.
pub const ACCOUNT_MEDIA_KEY: &str = "accountMedia";

/// Sub-collection holding bundle records that group media containers by id.
pub const MEDIA_BUNDLES_KEY: &str = "accountMediaBundles";

/// Decode an opaque item record into a typed view.
///
/// Returns `None` when the record's shape does not match; pass-through
/// collections may carry records of unrelated shapes.
pub fn decode_record<T: DeserializeOwned>(record: &Value) -> Option<T> {
    serde_json::from_value(record.clone()).ok()
}

/// Attachment reference found inside posts and messages. Points at either a
/// bundle record or directly at a media container.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_id: String,
}

/// Bundle record referencing multiple media containers by id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaBundle {
    pub id: String,
    #[serde(default)]
    pub account_media_ids: Vec<String>,
}

/// Media container pairing an id with its downloadable descriptor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMedia {
    pub id: String,
    pub media: Option<MediaDescriptor>,
}

/// The actual download descriptor nested inside a media container.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    /// Download locations; empty means the media has no retrievable content.
    #[serde(default)]
    pub locations: Vec<MediaLocation>,

    /// Explicit CDN filename, when the API provides one.
    #[serde(default)]
    pub filename: Option<String>,

    /// Raw storage location; its last path segment is the filename fallback.
    #[serde(default)]
    pub location: Option<String>,

    /// Creation time in epoch seconds.
    #[serde(default)]
    pub created_at: i64,
}

/// One download location.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaLocation {
    pub location: String,
}

/// A timeline post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// A direct message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// An account record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub id: String,
    pub username: String,
}

/// A subscription record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub account_id: String,
}

/// A message group record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageGroup {
    pub group_id: String,
    pub partner_account_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_record_tolerates_extra_fields() {
        let record = json!({
            "id": "B1",
            "accountMediaIds": ["M1", "M2"],
            "previewId": "P1",
            "permissions": {"flags": 0}
        });

        let bundle: MediaBundle = decode_record(&record).unwrap();
        assert_eq!(bundle.id, "B1");
        assert_eq!(bundle.account_media_ids, ["M1", "M2"]);
    }

    #[test]
    fn decode_record_rejects_mismatched_shapes() {
        let record = json!({"username": "someone"});
        assert!(decode_record::<MediaBundle>(&record).is_none());
    }

    #[test]
    fn descriptor_defaults_cover_missing_fields() {
        let record = json!({"locations": []});
        let descriptor: MediaDescriptor = decode_record(&record).unwrap();
        assert!(descriptor.locations.is_empty());
        assert!(descriptor.filename.is_none());
        assert_eq!(descriptor.created_at, 0);
    }
}
