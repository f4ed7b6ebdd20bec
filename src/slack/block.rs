use serde::ser::SerializeStruct;
use serde::{ser, Serialize};
use url::Url;

/// Slack's block API is its most modern, and allows us to mix images with
/// formatted text. This is our limited subset thereof.
///
/// <https://api.slack.com/reference/block-kit/blocks>
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// <https://api.slack.com/reference/block-kit/blocks#image>
    Image { image_url: Url, alt_text: String },
    /// A section of "mrkdwn", Slack's alternative to Markdown.
    ///
    /// <https://api.slack.com/reference/surfaces/formatting#basics>
    Mrkdwn(String),
}

/// An image to attach to a reply. See [Block::Image].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBlock {
    pub url: Url,
    pub alt_text: String,
}

impl ImageBlock {
    pub fn new<T: Into<String>>(url: Url, alt_text: T) -> Self {
        ImageBlock {
            url,
            alt_text: alt_text.into(),
        }
    }
}

impl From<ImageBlock> for Block {
    fn from(x: ImageBlock) -> Self {
        Block::Image {
            image_url: x.url,
            alt_text: x.alt_text,
        }
    }
}

#[derive(Serialize)]
struct RawTextBlock<'a> {
    #[serde(rename = "type")]
    typ: &'static str,
    text: &'a String,
}

impl ser::Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match self {
            Block::Image {
                image_url,
                alt_text,
            } => {
                let mut state = serializer.serialize_struct("Block", 3)?;
                state.serialize_field("type", "image")?;
                state.serialize_field("image_url", image_url.as_str())?;
                state.serialize_field("alt_text", alt_text)?;
                state.end()
            }

            Block::Mrkdwn(x) => {
                let mut state = serializer.serialize_struct("Block", 2)?;
                state.serialize_field("type", "section")?;

                let inner = RawTextBlock {
                    typ: "mrkdwn",
                    text: x,
                };
                state.serialize_field("text", &inner)?;
                state.end()
            }
        }
    }
}
