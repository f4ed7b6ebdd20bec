//! Helpers around Slack's use of OAuth Bearer Authentication.

use std::fmt;

/// A newtype wrapper around Slack access tokens, typically a bot token
/// beginning `xoxb-`. Immutable once constructed.
#[derive(PartialEq, Eq, Clone)]
pub struct SlackAccessToken(String);

impl SlackAccessToken {
    pub fn new<T: Into<String>>(token: T) -> Self {
        SlackAccessToken(token.into())
    }
}

/// Tokens end up in logs via `Debug` more easily than one might think.
impl fmt::Debug for SlackAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SlackAccessToken(<redacted>)")
    }
}

/// Convert a Slack access token to a `Bearer` `Authorization` header value.
///
/// ```
/// use crs_slack::slack::auth::{to_auth_header_val, SlackAccessToken};
///
/// let token = SlackAccessToken::new("xoxb-foo");
/// assert_eq!(to_auth_header_val(&token), "Bearer xoxb-foo");
/// ```
pub fn to_auth_header_val(t: &SlackAccessToken) -> String {
    format!("Bearer {}", t.0)
}
