//! The Slack API client and the transport helper every endpoint goes through.

use super::{auth::*, error::SlackError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{ops::Index, time::Duration};
use tracing::{debug, dispatcher, error, Dispatch};

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// Parameters for endpoints which don't take any.
pub(super) const NO_PARAMS: &[(&str, &str)] = &[];

/// A client for Slack's Web API, authenticated as a single token.
///
/// Holds a [reqwest::Client] and therefore a connection pool internally, so
/// it should be reused. Nothing in here is mutated after construction; every
/// endpoint method takes `&self` and issues exactly one request.
///
/// Failures are logged at `error` level before being returned. Logs go to the
/// [Dispatch] that was the default when the client was constructed, unless
/// another is supplied via [SlackClient::with_logger].
pub struct SlackClient {
    http: reqwest::Client,
    base: String,
    token: SlackAccessToken,
    logger: Dispatch,
}

impl SlackClient {
    /// `base` is ordinarily [API_BASE]; tests point it elsewhere.
    pub fn new(base: String, token: SlackAccessToken) -> Self {
        Self::from_parts(reqwest::Client::new(), base, token)
    }

    /// As per [SlackClient::new], but abandoning any request which takes
    /// longer than `timeout` to complete.
    pub fn with_timeout(
        base: String,
        token: SlackAccessToken,
        timeout: Duration,
    ) -> Result<Self, SlackError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::from_parts(http, base, token))
    }

    fn from_parts(http: reqwest::Client, base: String, token: SlackAccessToken) -> Self {
        SlackClient {
            http,
            base: base.trim_end_matches('/').to_owned(),
            token,
            logger: dispatcher::get_default(Dispatch::clone),
        }
    }

    /// Send this client's logs to `logger` rather than the default captured
    /// at construction.
    pub fn with_logger(mut self, logger: Dispatch) -> Self {
        self.logger = logger;
        self
    }

    pub fn token(&self) -> &SlackAccessToken {
        &self.token
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Send a GET request to any Slack API method, handling authentication.
    /// The parameters become the query string, if there are any.
    pub(super) async fn get<Q, T>(&self, method: &str, query: &Q) -> Result<T, SlackError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url_with_query(method, query)?;

        self.log(|| debug!(method = %method, "Sending GET request"));
        self.send(self.http.get(url)).await
    }

    /// Send a form-encoded POST request to any Slack API method, handling
    /// authentication.
    pub(super) async fn post<P, T>(&self, method: &str, params: &P) -> Result<T, SlackError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_urlencoded::to_string(params)?;

        self.log(|| debug!(method = %method, "Sending POST request"));
        self.send(self.http.post(self.url(method)).body(body)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, SlackError> {
        let res: APIResult<T> = req
            .header(AUTHORIZATION, to_auth_header_val(&self.token))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await?
            .json()
            .await?;

        res.into_result()
    }

    /// Log a failure alongside the operation that was attempted. Errors
    /// reported by Slack carry that context onwards; transport faults are
    /// returned as they are.
    pub(super) fn fail(&self, ctx: &'static str, e: SlackError) -> SlackError {
        self.log(|| error!("{}: {}", ctx, e));

        if e.is_transport_fault() {
            e
        } else {
            e.context(ctx)
        }
    }

    fn log<F: FnOnce()>(&self, f: F) {
        dispatcher::with_default(&self.logger, f)
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base, method)
    }

    fn url_with_query<Q: Serialize + ?Sized>(
        &self,
        method: &str,
        query: &Q,
    ) -> Result<String, SlackError> {
        let mut url = self.url(method);

        let qs = serde_urlencoded::to_string(query)?;
        if !qs.is_empty() {
            url.push('?');
            url.push_str(&qs);
        }

        Ok(url)
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "channel": { "id": "C0123456789" }
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

impl<T> APIResult<T> {
    fn into_result(self) -> Result<T, SlackError> {
        match self {
            APIResult::Ok(x) => Ok(x),
            APIResult::Err(ErrorResponse { error: Some(e), .. }) => {
                Err(SlackError::APIResponseError(e))
            }
            APIResult::Err(ErrorResponse { error: None, .. }) => {
                Err(SlackError::APIResponseMissingError)
            }
        }
    }
}

/// The universal response in case of an unsuccessful request.
// The `ok` field is checked here, and must be checked on success types too,
// otherwise an otherwise empty successful response could be mistaken for an
// error and vice versa.
#[derive(Deserialize)]
struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::ok_false")]
    ok: bool,
    error: Option<String>,
}

/// A successful response, in full.
///
/// Most endpoints return more than we'd want to model, and callers tend to
/// need one or two fields from it such as a message's `ts` or a new channel's
/// ID, so we keep the whole JSON object. Indexing with a key that isn't
/// present yields `null`, as with [serde_json::Value].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Success")]
pub struct SlackResponse(Map<String, Value>);

#[derive(Deserialize)]
struct Success {
    #[serde(deserialize_with = "crate::de::ok_true")]
    ok: bool,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl From<Success> for SlackResponse {
    fn from(x: Success) -> Self {
        let mut fields = x.fields;
        fields.insert("ok".into(), Value::Bool(x.ok));
        SlackResponse(fields)
    }
}

impl SlackResponse {
    pub fn ok(&self) -> bool {
        self.0.get("ok").and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl Index<&str> for SlackResponse {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.0.get(key).unwrap_or(&NULL)
    }
}
