//! HTTP client for the content API.

use reqwest::{header, Client, Response};

use crate::error::{Error, Result};

/// Default API origin.
pub const DEFAULT_ORIGIN: &str = "https://apiv3.fansly.com";

/// Path prefix shared by all collection endpoints.
const API_PREFIX: &str = "/api/v1";

/// API client carrying the credential headers for one run.
///
/// Page fetches and media downloads both go through this client, so every
/// outbound request carries the same authorization token and user agent.
#[derive(Debug)]
pub struct ApiClient {
    client: Client,
    origin: String,
    authorization: header::HeaderValue,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(
        origin: impl Into<String>,
        token: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent.into())
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        let authorization = token
            .into()
            .parse()
            .map_err(|_| Error::Api("Authorization token is not a valid header value".into()))?;

        let origin = origin.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            origin,
            authorization,
        })
    }

    /// Fetch one collection page. `page_path` is relative to `/api/v1/` and
    /// already carries its cursor parameters.
    pub async fn get_page(&self, page_path: &str) -> Result<Response> {
        let url = format!("{}{}/{}", self.origin, API_PREFIX, page_path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, self.authorization.clone())
            .send()
            .await?;

        tracing::debug!("Response status: {}", response.status());
        Ok(response)
    }

    /// Stream a media file from an absolute URL with the credential headers.
    pub async fn download_file(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.authorization.clone())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Download(format!(
                "Failed to download file: HTTP {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_origin() {
        let api = ApiClient::new("http://localhost:9999/", "token", "agent").unwrap();
        assert_eq!(api.origin, "http://localhost:9999");
    }

    #[test]
    fn rejects_token_with_invalid_header_characters() {
        assert!(ApiClient::new(DEFAULT_ORIGIN, "bad\ntoken", "agent").is_err());
    }
}
