//! Exercise a channel's lifecycle against a real workspace: create a channel,
//! invite someone to it, wait a moment, and archive it again.
//!
//! Reads its configuration from the environment, or a `.env` file. See
//! [crs_slack::config].

use crs_slack::{
    config::Config,
    slack::{ChannelName, SlackClient, SlackError},
};
use dotenvy::dotenv;
use std::{
    process::ExitCode,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tracing::{error, info, warn};

/// How long to leave the channel around for before archiving it.
const LINGER: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let cfg = match Config::from_env() {
        Ok(x) => x,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match cfg.client() {
        Ok(x) => x,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // The client has already logged anything that went wrong.
    match run(&client, &cfg).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) | Err(_) => ExitCode::FAILURE,
    }
}

/// Returns `false` if Slack created the channel but didn't say what it was
/// called, leaving us nothing to archive.
async fn run(client: &SlackClient, cfg: &Config) -> Result<bool, SlackError> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let name = ChannelName(format!("crs-demo-{}", secs));

    let created = client.create_channel(&name).await?;
    let Some(channel) = created.channel_id() else {
        error!("Slack didn't return an ID for #{}", name);
        return Ok(false);
    };
    info!("Created #{} ({})", name, channel);

    match &cfg.invite_user {
        Some(user) => {
            client
                .invite_to_channel(&channel, std::slice::from_ref(user))
                .await?;
            info!("Invited {} to #{}", user, name);
        }
        None => warn!("No $SLACK_INVITE_USER environment variable found"),
    }

    tokio::time::sleep(LINGER).await;

    client.archive_channel(&channel).await?;
    info!("Archived #{}", name);

    Ok(true)
}
