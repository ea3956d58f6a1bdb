//! Idempotent media file downloading.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::api::types::MediaDescriptor;
use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::fs::paths::destination_path;

/// Minimum file size to show a progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Result of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file was fetched and written.
    Saved(PathBuf),
    /// A file already exists at the destination path; nothing was fetched.
    AlreadyPresent(PathBuf),
    /// The descriptor carries no downloadable content.
    Skipped,
}

/// Download a descriptor into `folder`, skipping files already on disk.
///
/// Existence of the destination path is the only idempotence check; file
/// contents are never re-fetched or re-verified.
pub async fn download_media(
    api: &ApiClient,
    descriptor: &MediaDescriptor,
    folder: &Path,
    subdir_prefix: &str,
) -> Result<Outcome> {
    let Some(location) = descriptor.locations.first() else {
        tracing::warn!("Media without download location");
        return Ok(Outcome::Skipped);
    };

    let Some(output_path) = destination_path(folder, subdir_prefix, descriptor) else {
        tracing::warn!("Media without a derivable filename");
        return Ok(Outcome::Skipped);
    };

    if output_path.exists() {
        tracing::debug!("Already on disk: {}", output_path.display());
        return Ok(Outcome::AlreadyPresent(output_path));
    }

    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    stream_to_file(api, &location.location, &output_path).await?;

    tracing::info!("Saved {}", output_path.display());
    Ok(Outcome::Saved(output_path))
}

/// Stream a URL body to a file, with a progress bar for large downloads.
async fn stream_to_file(api: &ApiClient, url: &str, output_path: &Path) -> Result<()> {
    let response = api.download_file(url).await?;

    let content_length = response.content_length();
    let progress = content_length
        .filter(|len| *len > PROGRESS_THRESHOLD)
        .map(|len| {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            bar
        });

    let mut file = File::create(output_path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        if let Some(bar) = &progress {
            bar.set_position(downloaded);
        }
    }

    file.flush().await?;

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::types::decode_record;

    fn descriptor_for(server: &MockServer) -> MediaDescriptor {
        decode_record(&json!({
            "locations": [{"location": format!("{}/cdn/clip.mp4", server.uri())}],
            "filename": "clip.mp4",
            "createdAt": 1619872245
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn second_download_is_satisfied_from_disk() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cdn/clip.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"video-bytes".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), "token", "agent").unwrap();
        let descriptor = descriptor_for(&server);
        let folder = tempfile::tempdir().unwrap();

        let first = download_media(&api, &descriptor, folder.path(), "")
            .await
            .unwrap();
        let Outcome::Saved(saved_path) = first else {
            panic!("expected Saved, got {:?}", first);
        };
        assert_eq!(std::fs::read(&saved_path).unwrap(), b"video-bytes");

        let second = download_media(&api, &descriptor, folder.path(), "")
            .await
            .unwrap();
        assert_eq!(second, Outcome::AlreadyPresent(saved_path));
    }

    #[tokio::test]
    async fn descriptor_without_locations_is_skipped() {
        let server = MockServer::start().await;
        let api = ApiClient::new(server.uri(), "token", "agent").unwrap();
        let folder = tempfile::tempdir().unwrap();

        let outcome = download_media(&api, &MediaDescriptor::default(), folder.path(), "")
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Skipped);
    }

    #[tokio::test]
    async fn failed_fetch_surfaces_as_download_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cdn/clip.mp4"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), "token", "agent").unwrap();
        let descriptor = descriptor_for(&server);
        let folder = tempfile::tempdir().unwrap();

        let err = download_media(&api, &descriptor, folder.path(), "")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Download(_)));
    }
}
