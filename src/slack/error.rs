use std::{error::Error, fmt};

/// Sum type representing every way a call to Slack can fail.
///
/// There are two kinds of failure. Slack itself may reject a call by
/// answering `ok: false`, in which case we have an API error and usually a
/// machine-readable code such as `channel_already_exists`. Otherwise
/// something went wrong before Slack could tell us anything, a transport
/// fault.
///
/// Endpoint methods wrap API errors in [SlackError::Context] naming the
/// operation that failed. Transport faults reach the caller unwrapped.
#[derive(Debug)]
pub enum SlackError {
    /// The request couldn't be sent or the response wasn't valid JSON.
    APIRequestFailed(reqwest::Error),
    RequestEncodingFailed(serde_urlencoded::ser::Error),
    BlockEncodingFailed(serde_json::Error),
    /// Slack answered `ok: false` with the enclosed error code.
    APIResponseError(String),
    /// Slack answered `ok: false` without saying why.
    APIResponseMissingError,
    Context(&'static str, Box<SlackError>),
}

impl SlackError {
    /// Annotate the error with the operation that was being attempted.
    pub fn context(self, ctx: &'static str) -> Self {
        SlackError::Context(ctx, Box::new(self))
    }

    /// The underlying error, looking through any context.
    pub fn root(&self) -> &SlackError {
        match self {
            SlackError::Context(_, e) => e.root(),
            e => e,
        }
    }

    /// The error code reported by Slack, if Slack reported one.
    ///
    /// ```
    /// use crs_slack::slack::SlackError;
    ///
    /// let e = SlackError::APIResponseError("channel_not_found".into())
    ///     .context("Error archiving conversation");
    /// assert_eq!(e.code(), Some("channel_not_found"));
    /// ```
    pub fn code(&self) -> Option<&str> {
        match self.root() {
            SlackError::APIResponseError(code) => Some(code),
            _ => None,
        }
    }

    /// Whether the failure happened below Slack's own envelope.
    pub fn is_transport_fault(&self) -> bool {
        matches!(
            self.root(),
            SlackError::APIRequestFailed(_)
                | SlackError::RequestEncodingFailed(_)
                | SlackError::BlockEncodingFailed(_)
        )
    }
}

impl From<reqwest::Error> for SlackError {
    fn from(e: reqwest::Error) -> Self {
        SlackError::APIRequestFailed(e)
    }
}

impl From<serde_urlencoded::ser::Error> for SlackError {
    fn from(e: serde_urlencoded::ser::Error) -> Self {
        SlackError::RequestEncodingFailed(e)
    }
}

impl From<serde_json::Error> for SlackError {
    fn from(e: serde_json::Error) -> Self {
        SlackError::BlockEncodingFailed(e)
    }
}

impl fmt::Display for SlackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlackError::APIRequestFailed(e) => write!(f, "Slack API request failed: {}", e),
            SlackError::RequestEncodingFailed(e) => {
                write!(f, "Failed to encode Slack API parameters: {}", e)
            }
            SlackError::BlockEncodingFailed(e) => write!(f, "Failed to encode Slack blocks: {}", e),
            SlackError::APIResponseError(e) => write!(f, "Slack API returned error: {}", e),
            SlackError::APIResponseMissingError => write!(f, "Slack API failed to return error."),
            SlackError::Context(ctx, e) => write!(f, "{}: {}", ctx, e),
        }
    }
}

impl Error for SlackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SlackError::APIRequestFailed(e) => Some(e),
            SlackError::RequestEncodingFailed(e) => Some(e),
            SlackError::BlockEncodingFailed(e) => Some(e),
            SlackError::Context(_, e) => Some(e.as_ref()),
            SlackError::APIResponseError(_) | SlackError::APIResponseMissingError => None,
        }
    }
}
