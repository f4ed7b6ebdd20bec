//! Manage the lifecycle of Slack channels: create them, invite people into
//! them, and archive them.

use super::{api::*, error::SlackError, user::UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Channel names as are visible in the Slack UI, without the leading hash.
/// Slack expects these to be lowercase, without spaces or periods.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelName(pub String);

/// Format without the surrounding newtype wrapper.
///
/// ```
/// use crs_slack::slack::channel::ChannelName;
///
/// let x = ChannelName("fp".into());
/// assert_eq!(format!("{}", x), "fp");
/// ```
impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Because channel names can change, channels are generally referred to by
/// their underlying ID. This can be found in the UI by copying a link to the
/// channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// <https://api.slack.com/methods/conversations.create#args>
#[derive(Serialize)]
struct CreateRequest<'a> {
    name: &'a ChannelName,
    is_private: bool,
}

/// <https://api.slack.com/methods/conversations.invite#args>
#[derive(Serialize)]
struct InviteRequest<'a> {
    channel: &'a ChannelId,
    /// Comma-separated.
    users: String,
}

/// <https://api.slack.com/methods/conversations.archive#args>
#[derive(Serialize)]
struct ArchiveRequest<'a> {
    channel: &'a ChannelId,
}

impl SlackClient {
    /// Create a public channel.
    pub async fn create_channel(&self, name: &ChannelName) -> Result<SlackResponse, SlackError> {
        self.create_channel_with_privacy(name, false).await
    }

    /// Create a channel, which is only visible to its members if `is_private`.
    /// Fails with `name_taken` if the name is already in use.
    pub async fn create_channel_with_privacy(
        &self,
        name: &ChannelName,
        is_private: bool,
    ) -> Result<SlackResponse, SlackError> {
        self.post("conversations.create", &CreateRequest { name, is_private })
            .await
            .map_err(|e| self.fail("Error creating conversation", e))
    }

    pub async fn invite_to_channel(
        &self,
        channel: &ChannelId,
        users: &[UserId],
    ) -> Result<SlackResponse, SlackError> {
        let users = users
            .iter()
            .map(|u| u.0.as_str())
            .collect::<Vec<_>>()
            .join(",");

        self.post("conversations.invite", &InviteRequest { channel, users })
            .await
            .map_err(|e| self.fail("Error inviting users", e))
    }

    pub async fn archive_channel(&self, channel: &ChannelId) -> Result<SlackResponse, SlackError> {
        self.post("conversations.archive", &ArchiveRequest { channel })
            .await
            .map_err(|e| self.fail("Error archiving conversation", e))
    }
}

impl SlackResponse {
    /// The ID of the channel just created.
    pub fn channel_id(&self) -> Option<ChannelId> {
        self.get("channel")
            .and_then(|c| c.get("id"))
            .and_then(Value::as_str)
            .map(|x| ChannelId(x.to_owned()))
    }
}
