//! Message history walking.

use std::path::Path;

use crate::api::types::{decode_record, Message, MessageGroup};
use crate::api::{endpoints, ApiClient};
use crate::config::Config;
use crate::download::media::{download_media, Outcome};
use crate::download::state::DownloadState;
use crate::error::Result;
use crate::media::resolver;
use crate::paging::PagedCollection;

/// Subdirectory prefix separating conversation media from timeline media.
const MESSAGE_SUBDIR_PREFIX: &str = "msg_";

/// Walk one conversation's message history and download the partner's
/// attachments. The operator's own messages are not archived.
pub async fn download_messages(
    api: &ApiClient,
    config: &Config,
    group: &MessageGroup,
    folder: &Path,
    state: &mut DownloadState,
) -> Result<()> {
    let mut messages = PagedCollection::open(api, endpoints::messages(&group.group_id)).await?;

    'messages: while let Some(record) = messages.next_item().await? {
        let Some(message) = decode_record::<Message>(&record) else {
            tracing::warn!("Skipping malformed message");
            continue;
        };

        if message.sender_id != group.partner_account_id {
            continue;
        }

        for attachment in &message.attachments {
            for descriptor in resolver::resolve(attachment, messages.state()) {
                let outcome =
                    download_media(api, &descriptor, folder, MESSAGE_SUBDIR_PREFIX).await?;
                state.record(&outcome);

                if matches!(outcome, Outcome::AlreadyPresent(_)) && config.options.quick_fetch {
                    tracing::info!("Hit previously downloaded media, stopping message walk");
                    break 'messages;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::{AccountConfig, OptionsConfig};

    fn test_config() -> Config {
        Config {
            account: AccountConfig {
                authorization_token: "token".to_string(),
                user_agent: "agent".to_string(),
            },
            options: OptionsConfig::default(),
        }
    }

    #[tokio::test]
    async fn only_partner_messages_are_archived() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/message"))
            .and(query_param("groupId", "G1"))
            .and(query_param("before", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "response": {
                    "messages": [
                        {"id": "52", "senderId": "partner", "attachments": [{"contentId": "M1"}]},
                        {"id": "51", "senderId": "me", "attachments": [{"contentId": "M2"}]}
                    ],
                    "accountMedia": [
                        {
                            "id": "M1",
                            "media": {
                                "locations": [{"location": format!("{}/cdn/theirs.jpg", server.uri())}],
                                "filename": "theirs.jpg",
                                "createdAt": 0
                            }
                        },
                        {
                            "id": "M2",
                            "media": {
                                "locations": [{"location": format!("{}/cdn/mine.jpg", server.uri())}],
                                "filename": "mine.jpg",
                                "createdAt": 0
                            }
                        }
                    ]
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/message"))
            .and(query_param("before", "51"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "response": {"messages": []}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cdn/theirs.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpg".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri(), "token", "agent").unwrap();
        let folder = tempfile::tempdir().unwrap();
        let group = MessageGroup {
            group_id: "G1".to_string(),
            partner_account_id: "partner".to_string(),
        };

        let mut state = DownloadState::new("alice".to_string());
        download_messages(&api, &test_config(), &group, folder.path(), &mut state)
            .await
            .unwrap();

        assert_eq!(state.pic_count, 1);
        assert!(folder
            .path()
            .join("msg_pic/19700101_000000_theirs.jpg")
            .exists());
        assert!(!folder
            .path()
            .join("msg_pic/19700101_000000_mine.jpg")
            .exists());
    }
}
