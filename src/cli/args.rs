//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Fansly media archiver CLI.
#[derive(Parser, Debug)]
#[command(
    name = "fansly-archiver",
    version,
    about = "Incrementally archive media from subscribed Fansly accounts",
    long_about = "Walks the timeline of every subscribed account and the message history of\n\
                  every conversation, downloading any media not already on disk."
)]
pub struct Args {
    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Authorization token.
    #[arg(short, long, env = "FANSLY_TOKEN")]
    pub token: Option<String>,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent", env = "FANSLY_USER_AGENT")]
    pub user_agent: Option<String>,

    /// API origin override.
    #[arg(long = "api-origin")]
    pub api_origin: Option<String>,

    /// Stop each walk at the first already-downloaded file.
    #[arg(long)]
    pub quick_fetch: bool,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(token) = self.token {
            config.account.authorization_token = token;
        }

        if let Some(user_agent) = self.user_agent {
            config.account.user_agent = user_agent;
        }

        if let Some(directory) = self.download_directory {
            config.options.download_directory = Some(directory);
        }

        if let Some(origin) = self.api_origin {
            config.options.api_origin = origin;
        }

        if self.quick_fetch {
            config.options.quick_fetch = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overrides_only_provided_values() {
        let args = Args {
            download_directory: Some(PathBuf::from("/data")),
            token: Some("cli-token".to_string()),
            user_agent: None,
            api_origin: None,
            quick_fetch: true,
            config: PathBuf::from("config.toml"),
            debug: false,
        };

        let mut config = Config::default();
        let original_user_agent = config.account.user_agent.clone();
        args.merge_into_config(&mut config);

        assert_eq!(config.account.authorization_token, "cli-token");
        assert_eq!(config.account.user_agent, original_user_agent);
        assert_eq!(
            config.options.download_directory,
            Some(PathBuf::from("/data"))
        );
        assert!(config.options.quick_fetch);
    }
}
