//! Attachment-to-media resolution.

use crate::api::types::{
    decode_record, AccountMedia, Attachment, MediaBundle, MediaDescriptor, ACCOUNT_MEDIA_KEY,
    MEDIA_BUNDLES_KEY,
};
use crate::paging::AccumulatedState;

/// Resolve an attachment reference to its downloadable media descriptors.
///
/// An attachment points either at a bundle (one level of indirection over
/// several media containers, yielded in bundle order) or directly at a
/// container; both forms are checked because the two response shapes are
/// structurally similar but not identical. Unresolved candidate ids and
/// absent sub-collections yield nothing.
pub fn resolve(attachment: &Attachment, state: &AccumulatedState) -> Vec<MediaDescriptor> {
    let mut candidate_ids: Vec<String> = Vec::new();

    for record in state.sequence(MEDIA_BUNDLES_KEY) {
        let Some(bundle) = decode_record::<MediaBundle>(record) else {
            continue;
        };
        if bundle.id == attachment.content_id {
            candidate_ids.extend(bundle.account_media_ids);
        }
    }

    let containers: Vec<AccountMedia> = state
        .sequence(ACCOUNT_MEDIA_KEY)
        .iter()
        .filter_map(|record| decode_record::<AccountMedia>(record))
        .collect();

    if containers.iter().any(|c| c.id == attachment.content_id) {
        candidate_ids.push(attachment.content_id.clone());
    }

    candidate_ids
        .iter()
        .filter_map(|id| containers.iter().find(|c| c.id == *id))
        .filter_map(|container| container.media.clone())
        .collect()
}
