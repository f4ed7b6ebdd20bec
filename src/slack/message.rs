//! Post messages, and threaded replies made of blocks, to any Slack channel.

use super::{api::*, block::*, channel::ChannelId, error::SlackError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The timestamp Slack assigns a message on posting. Doubles as the
/// message's ID within its channel, and as the thread ID for replies to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTs(pub String);

impl fmt::Display for MessageTs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// <https://api.slack.com/methods/chat.postMessage#args>
#[derive(Serialize)]
struct MessageRequest<'a> {
    channel: &'a ChannelId,
    text: &'a str,
}

/// As per [MessageRequest], but threaded and with `blocks` in lieu of `text`.
#[derive(Serialize)]
struct ReplyRequest<'a> {
    channel: &'a ChannelId,
    thread_ts: &'a MessageTs,
    /// A JSON array, as form bodies can't nest.
    blocks: String,
}

impl SlackClient {
    /// Post a plaintext message in a channel.
    pub async fn post_message(
        &self,
        channel: &ChannelId,
        text: &str,
    ) -> Result<SlackResponse, SlackError> {
        self.post("chat.postMessage", &MessageRequest { channel, text })
            .await
            .map_err(|e| self.fail("Error posting message", e))
    }

    /// Reply in the thread of the message identified by `thread_ts`.
    pub async fn post_reply(
        &self,
        channel: &ChannelId,
        thread_ts: &MessageTs,
        blocks: &[Block],
    ) -> Result<SlackResponse, SlackError> {
        let res = match serde_json::to_string(blocks) {
            Ok(blocks) => {
                let req = ReplyRequest {
                    channel,
                    thread_ts,
                    blocks,
                };
                self.post("chat.postMessage", &req).await
            }
            Err(e) => Err(e.into()),
        };

        res.map_err(|e| self.fail("Error posting reply", e))
    }

    /// Reply in a thread with nothing but images.
    pub async fn add_reply(
        &self,
        channel: &ChannelId,
        thread_ts: &MessageTs,
        images: &[ImageBlock],
    ) -> Result<SlackResponse, SlackError> {
        let blocks: Vec<Block> = images.iter().cloned().map(Block::from).collect();

        self.post_reply(channel, thread_ts, &blocks).await
    }
}

impl SlackResponse {
    /// The timestamp of the message just posted.
    pub fn ts(&self) -> Option<MessageTs> {
        self.get("ts")
            .and_then(Value::as_str)
            .map(|x| MessageTs(x.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::testing::*;
    use mockito::Matcher;
    use serde_json::json;
    use url::Url;

    fn channel() -> ChannelId {
        ChannelId("C123".into())
    }

    fn thread() -> MessageTs {
        MessageTs("1719288455.000100".into())
    }

    fn image(url: &str, alt: &str) -> ImageBlock {
        ImageBlock::new(Url::parse(url).unwrap(), alt)
    }

    #[tokio::test]
    async fn test_post_message() {
        let mut srv = server().await;

        let mock = srv
            .mock("POST", "/chat.postMessage")
            .match_header("authorization", "Bearer xoxb-test")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("channel".into(), "C123".into()),
                Matcher::UrlEncoded("text".into(), "VCRテスト: こんにちは！".into()),
            ]))
            .with_body(
                r#"{
                    "ok": true,
                    "channel": "C123",
                    "ts": "12345",
                    "message": { "text": "VCRテスト: こんにちは！" }
                }"#,
            )
            .create_async()
            .await;

        let res = client(&srv)
            .post_message(&channel(), "VCRテスト: こんにちは！")
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(res.ok());
        assert_eq!(res.ts(), Some(MessageTs("12345".into())));
        assert_eq!(res["message"]["text"], "VCRテスト: こんにちは！");
    }

    #[tokio::test]
    async fn test_post_message_api_error() {
        let mut srv = server().await;

        srv.mock("POST", "/chat.postMessage")
            .with_body(r#"{"ok": false, "error": "invalid_auth"}"#)
            .create_async()
            .await;

        let logs = CapturedLogs::default();
        let err = client(&srv)
            .with_logger(logs.dispatch())
            .post_message(&channel(), "hello")
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some("invalid_auth"));
        assert_eq!(
            err.to_string(),
            "Error posting message: Slack API returned error: invalid_auth"
        );
        assert!(logs.contents().contains("Error posting message"));
    }

    #[tokio::test]
    async fn test_post_message_transport_fault() {
        let mut srv = server().await;

        srv.mock("POST", "/chat.postMessage")
            .with_status(503)
            .with_body("Service Unavailable")
            .create_async()
            .await;

        let logs = CapturedLogs::default();
        let err = client(&srv)
            .with_logger(logs.dispatch())
            .post_message(&channel(), "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, SlackError::APIRequestFailed(_)));
        assert!(logs.contents().contains("Error posting message"));
    }

    #[tokio::test]
    async fn test_post_reply_sends_serialised_blocks() {
        let mut srv = server().await;

        let blocks = vec![
            Block::Mrkdwn("Here you go".into()),
            Block::from(image("https://example.com/img.png", "img")),
        ];
        let expected = serde_json::to_string(&blocks).unwrap();

        let mock = srv
            .mock("POST", "/chat.postMessage")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("channel".into(), "C123".into()),
                Matcher::UrlEncoded("thread_ts".into(), "1719288455.000100".into()),
                Matcher::UrlEncoded("blocks".into(), expected),
            ]))
            .with_body(r#"{"ok": true, "message": {"thread_ts": "1719288455.000100"}}"#)
            .create_async()
            .await;

        let res = client(&srv)
            .post_reply(&channel(), &thread(), &blocks)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(res["message"]["thread_ts"], "1719288455.000100");
    }

    #[tokio::test]
    async fn test_add_reply_echo_preserves_images() {
        let mut srv = server().await;

        let images = vec![
            image("https://image.lgtmoon.dev/517710", "LGTM画像"),
            image("https://example.com/img.png", "img"),
        ];

        // Slack echoes blocks back with extra fields of its own.
        let echo = json!({
            "ok": true,
            "ts": "1719288456.000200",
            "message": {
                "thread_ts": "1719288455.000100",
                "blocks": [
                    {
                        "type": "image",
                        "block_id": "a1",
                        "image_url": "https://image.lgtmoon.dev/517710",
                        "alt_text": "LGTM画像",
                        "image_width": 400,
                        "image_height": 400,
                        "image_bytes": 12345
                    },
                    {
                        "type": "image",
                        "block_id": "b2",
                        "image_url": "https://example.com/img.png",
                        "alt_text": "img"
                    }
                ]
            }
        });

        let sent = serde_json::to_string(
            &images.iter().cloned().map(Block::from).collect::<Vec<_>>(),
        )
        .unwrap();

        let mock = srv
            .mock("POST", "/chat.postMessage")
            .match_body(Matcher::UrlEncoded("blocks".into(), sent))
            .with_body(echo.to_string())
            .create_async()
            .await;

        let res = client(&srv)
            .add_reply(&channel(), &thread(), &images)
            .await
            .unwrap();

        mock.assert_async().await;

        let echoed = res["message"]["blocks"].as_array().unwrap();
        assert_eq!(echoed.len(), images.len());
        for (block, img) in echoed.iter().zip(&images) {
            assert_eq!(block["type"], "image");
            assert_eq!(block["image_url"], img.url.as_str());
            assert_eq!(block["alt_text"], img.alt_text.as_str());
        }
    }

    #[tokio::test]
    async fn test_add_reply_api_error() {
        let mut srv = server().await;

        srv.mock("POST", "/chat.postMessage")
            .with_body(r#"{"ok": false, "error": "invalid_blocks"}"#)
            .create_async()
            .await;

        let err = client(&srv)
            .add_reply(&channel(), &thread(), &[image("https://example.com/a.png", "a")])
            .await
            .unwrap_err();

        assert_eq!(err.code(), Some("invalid_blocks"));
        assert!(err.to_string().starts_with("Error posting reply: "));
    }
}
