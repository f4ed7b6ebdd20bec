//! Configuration read from environment variables.
//!
//! - `SLACK_API_TOKEN`: required.
//! - `SLACK_API_BASE`: defaults to [API_BASE].
//! - `SLACK_TIMEOUT_SECS`: per-request timeout. None by default.
//! - `SLACK_INVITE_USER`: a user ID for the demo to invite.
//!
//! Empty values are treated as absent.

use crate::slack::{SlackAccessToken, SlackClient, SlackError, UserId, API_BASE};
use std::{env, error::Error, fmt, time::Duration};

pub struct Config {
    pub token: SlackAccessToken,
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub invite_user: Option<UserId>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(k) => write!(f, "No ${} environment variable found", k),
            ConfigError::Invalid(k, v) => write!(f, "Could not parse ${}: {:?}", k, v),
        }
    }
}

impl Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// As per [Config::from_env], reading variables via `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |k: &str| lookup(k).filter(|v| !v.is_empty());

        let token = var("SLACK_API_TOKEN")
            .map(SlackAccessToken::new)
            .ok_or(ConfigError::Missing("SLACK_API_TOKEN"))?;

        let base_url = var("SLACK_API_BASE").unwrap_or_else(|| API_BASE.to_owned());

        let timeout = match var("SLACK_TIMEOUT_SECS") {
            None => None,
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::Invalid("SLACK_TIMEOUT_SECS", v)),
            },
        };

        let invite_user = var("SLACK_INVITE_USER").map(UserId);

        Ok(Config {
            token,
            base_url,
            timeout,
            invite_user,
        })
    }

    pub fn client(&self) -> Result<SlackClient, SlackError> {
        match self.timeout {
            Some(t) => SlackClient::with_timeout(self.base_url.clone(), self.token.clone(), t),
            None => Ok(SlackClient::new(self.base_url.clone(), self.token.clone())),
        }
    }
}
