//! A client for the subset of Slack's Web API we need: posting messages and
//! threaded replies, listing users, and the lifecycle of a channel.
//!
//! Every operation is a method on [SlackClient]. See [api].

pub mod api;
pub mod auth;
pub mod block;
pub mod channel;
pub mod error;
pub mod message;
pub mod user;

#[cfg(test)]
mod testing;

pub use api::{SlackClient, SlackResponse, API_BASE};
pub use auth::SlackAccessToken;
pub use block::{Block, ImageBlock};
pub use channel::{ChannelId, ChannelName};
pub use error::SlackError;
pub use message::MessageTs;
pub use user::{SlackUser, UserDirectory, UserId};
