//! Fansly Archiver - CLI entry point.

use std::collections::HashMap;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use fansly_archiver::{
    api::types::{decode_record, AccountInfo, MessageGroup, Subscription},
    api::{endpoints, ApiClient},
    cli::Args,
    config::{validate_config, Config},
    download::{download_messages, download_timeline, DownloadState, GlobalState},
    error::{exit_codes, Error, Result},
    fs::account_folder,
    output::{
        print_banner, print_config_summary, print_error, print_global_stats, print_info,
        print_walk_stats, print_warning,
    },
    paging::PagedCollection,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::MissingConfig(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Api(_) | Error::MergeConflict { .. } | Error::Http(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::Download(_) => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    print_config_summary(
        &config.download_directory().display().to_string(),
        config.options.quick_fetch,
    );

    let api = ApiClient::new(
        &config.options.api_origin,
        &config.account.authorization_token,
        &config.account.user_agent,
    )?;

    let download_root = config.download_directory();
    let mut usernames: HashMap<String, String> = HashMap::new();
    let mut global = GlobalState::default();

    // Resolve subscribed accounts
    print_info("Fetching subscriptions...");
    let subscriptions = PagedCollection::open(&api, endpoints::subscriptions())
        .await?
        .fetch_all()
        .await?;

    let account_ids: Vec<String> = subscriptions
        .sequence("subscriptions")
        .iter()
        .filter_map(|record| decode_record::<Subscription>(record))
        .map(|subscription| subscription.account_id)
        .collect();

    if account_ids.is_empty() {
        print_warning("No subscribed accounts found");
        return Ok(());
    }

    // Walk each account's timeline
    let mut accounts = PagedCollection::open(&api, endpoints::accounts(&account_ids)).await?;
    while let Some(record) = accounts.next_item().await? {
        let Some(account) = decode_record::<AccountInfo>(&record) else {
            tracing::warn!("Skipping malformed account record");
            continue;
        };
        usernames.insert(account.id.clone(), account.username.clone());

        print_info(&format!("Downloading account {}", account.username));
        let folder = account_folder(&download_root, &account.username)?;
        let mut state = DownloadState::new(account.username.clone());

        download_timeline(&api, &config, &account.id, &folder, &mut state).await?;

        print_walk_stats(&state);
        global.add_walk_stats(&state);
    }

    // Walk each conversation's message history
    print_info("Fetching message groups...");
    let mut groups = PagedCollection::open(&api, endpoints::groups()).await?;
    while let Some(record) = groups.next_item().await? {
        let Some(group) = decode_record::<MessageGroup>(&record) else {
            tracing::warn!("Skipping malformed message group record");
            continue;
        };

        let Some(username) = usernames.get(&group.partner_account_id) else {
            tracing::warn!(
                "Skipping conversation with unknown account {}",
                group.partner_account_id
            );
            continue;
        };

        print_info(&format!("Downloading messages with {}", username));
        let folder = account_folder(&download_root, username)?;
        let mut state = DownloadState::new(username.clone());

        download_messages(&api, &config, &group, &folder, &mut state).await?;

        print_walk_stats(&state);
        global.add_walk_stats(&state);
    }

    print_global_stats(&global);

    Ok(())
}
