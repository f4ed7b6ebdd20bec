//! Look up the people in a workspace by the name they go by in Slack.

use super::{api::*, error::SlackError};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use std::{collections::HashMap, fmt};

/// Users are referred to by ID across Slack's API, e.g. `U08RW7MHUG6`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The parts of a Slack user we care about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlackUser {
    pub id: UserId,
    /// As per [clean_display_name].
    pub display_name: String,
    /// The account name, e.g. `user.name`.
    pub name: String,
    pub real_name: String,
}

/// Maps cleaned display names to users.
///
/// Display names aren't unique in Slack, and two which differ only in
/// spacing collapse to the same key here. In that case whichever user Slack
/// listed last wins.
pub type UserDirectory = HashMap<String, SlackUser>;

/// <https://api.slack.com/methods/users.list#examples>
#[derive(Deserialize)]
struct ListResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::ok_true")]
    ok: bool,
    members: Vec<Member>,
}

/// The metadata we care about per-user within [ListResponse]. Slack omits
/// some of these for some kinds of account, and sends `null` for others.
#[serde_as]
#[derive(Deserialize)]
struct Member {
    id: UserId,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    real_name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    is_bot: bool,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    deleted: bool,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    profile: Profile,
}

#[serde_as]
#[derive(Deserialize, Default)]
struct Profile {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    display_name: String,
}

impl SlackClient {
    /// Get every active human in the workspace, keyed by display name.
    ///
    /// The directory is built afresh on every call.
    pub async fn users_list(&self) -> Result<UserDirectory, SlackError> {
        let res: ListResponse = self
            .get("users.list", NO_PARAMS)
            .await
            .map_err(|e| self.fail("Error fetching users", e))?;

        Ok(to_directory(res.members))
    }
}

/// Strip every whitespace character from a display name, wherever it
/// appears. This includes the ideographic (full-width) space, which people
/// commonly put between family and given names.
///
/// ```
/// use crs_slack::slack::user::clean_display_name;
///
/// assert_eq!(clean_display_name(" ユーザー\u{3000}サンプル "), "ユーザーサンプル");
/// ```
pub fn clean_display_name(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Drop bots, deleted accounts, and anyone without a display name.
fn to_directory(members: Vec<Member>) -> UserDirectory {
    members
        .into_iter()
        .filter(|m| !m.is_bot && !m.deleted)
        .filter_map(|m| {
            let display_name = clean_display_name(&m.profile.display_name);
            if display_name.is_empty() {
                return None;
            }

            let user = SlackUser {
                id: m.id,
                display_name: display_name.clone(),
                name: m.name,
                real_name: m.real_name,
            };

            Some((display_name, user))
        })
        .collect()
}
