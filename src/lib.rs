//! A small client for Slack's Web API.
//!
//! ```no_run
//! use crs_slack::slack::{ChannelId, SlackAccessToken, SlackClient, API_BASE};
//!
//! # async fn run() -> Result<(), crs_slack::slack::SlackError> {
//! let client = SlackClient::new(API_BASE.into(), SlackAccessToken::new("xoxb-..."));
//! let res = client.post_message(&ChannelId("C0123456789".into()), "hello").await?;
//! println!("posted at {:?}", res.ts());
//! # Ok(())
//! # }
//! ```

pub mod config;
mod de;
pub mod slack;
