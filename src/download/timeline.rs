//! Timeline walking.

use std::path::Path;

use crate::api::types::{decode_record, Post};
use crate::api::{endpoints, ApiClient};
use crate::config::Config;
use crate::download::media::{download_media, Outcome};
use crate::download::state::DownloadState;
use crate::error::Result;
use crate::media::resolver;
use crate::paging::PagedCollection;

/// Walk an account's timeline and download every resolvable attachment.
///
/// With `quick_fetch` enabled, the first already-present file ends the walk:
/// pages arrive newest-first, so everything older is assumed to be on disk
/// from an earlier run.
pub async fn download_timeline(
    api: &ApiClient,
    config: &Config,
    account_id: &str,
    folder: &Path,
    state: &mut DownloadState,
) -> Result<()> {
    let mut posts = PagedCollection::open(api, endpoints::timeline(account_id)).await?;

    'posts: while let Some(record) = posts.next_item().await? {
        let Some(post) = decode_record::<Post>(&record) else {
            tracing::warn!("Skipping malformed timeline post");
            continue;
        };

        for attachment in &post.attachments {
            for descriptor in resolver::resolve(attachment, posts.state()) {
                let outcome = download_media(api, &descriptor, folder, "").await?;
                state.record(&outcome);

                if matches!(outcome, Outcome::AlreadyPresent(_)) && config.options.quick_fetch {
                    tracing::info!("Hit previously downloaded media, stopping timeline walk");
                    break 'posts;
                }
            }
        }
    }

    Ok(())
}
