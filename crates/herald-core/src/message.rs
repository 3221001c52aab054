//! Generic message contract consumed by messaging providers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const BLOCK_TYPE_HEADER: &str = "header";
pub const BLOCK_TYPE_SECTION: &str = "section";
pub const BLOCK_TYPE_DIVIDER: &str = "divider";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
/// Public struct `Message` describing one outbound message from the host.
pub struct Message {
    pub channel: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blocks: Vec<ContentBlock>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thread_ref: String,
}

impl Message {
    pub fn text(channel: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<ContentBlock>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn in_thread(mut self, thread_ref: impl Into<String>) -> Self {
        self.thread_ref = thread_ref.into();
        self
    }

    /// Returns the thread anchor when the message is a reply.
    pub fn reply_thread(&self) -> Option<&str> {
        Some(self.thread_ref.as_str()).filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One label/value pair of a field section, kept in input order.
pub struct SectionField {
    pub label: String,
    pub value: String,
}

impl SectionField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawContentBlock")]
/// Enumerates supported `ContentBlock` values.
///
/// A section carrying a non-empty field map always decodes to
/// `SectionFields`; its `text` is dropped. Block types this schema does not
/// know decode to `Unsupported` so that translators can skip them.
pub enum ContentBlock {
    Header { text: String },
    SectionText { text: String },
    SectionFields { fields: Vec<SectionField> },
    Divider,
    Unsupported { kind: String },
}

impl ContentBlock {
    pub fn header(text: impl Into<String>) -> Self {
        Self::Header { text: text.into() }
    }

    pub fn section(text: impl Into<String>) -> Self {
        Self::SectionText { text: text.into() }
    }

    /// Builds a field section; no pairs yields an empty text section, as a
    /// decoded section with an empty field map does.
    pub fn fields<L, V>(pairs: impl IntoIterator<Item = (L, V)>) -> Self
    where
        L: Into<String>,
        V: Into<String>,
    {
        let fields = pairs
            .into_iter()
            .map(|(label, value)| SectionField::new(label, value))
            .collect::<Vec<_>>();
        if fields.is_empty() {
            return Self::SectionText {
                text: String::new(),
            };
        }
        Self::SectionFields { fields }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
/// Enumerates supported `ContentBlockError` values.
pub enum ContentBlockError {
    #[error("section field `{label}` must be a string value")]
    NonStringField { label: String },
}

#[derive(Debug, Deserialize)]
struct RawContentBlock {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    fields: Option<Map<String, Value>>,
}

impl TryFrom<RawContentBlock> for ContentBlock {
    type Error = ContentBlockError;

    fn try_from(raw: RawContentBlock) -> Result<Self, Self::Error> {
        let kind = raw.kind.unwrap_or_default();
        let text = raw.text.unwrap_or_default();
        match kind.as_str() {
            BLOCK_TYPE_HEADER => Ok(Self::Header { text }),
            BLOCK_TYPE_SECTION => {
                let fields = raw.fields.unwrap_or_default();
                if fields.is_empty() {
                    return Ok(Self::SectionText { text });
                }
                let fields = fields
                    .into_iter()
                    .map(|(label, value)| match value {
                        Value::String(value) => Ok(SectionField { label, value }),
                        _ => Err(ContentBlockError::NonStringField { label }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::SectionFields { fields })
            }
            BLOCK_TYPE_DIVIDER => Ok(Self::Divider),
            _ => Ok(Self::Unsupported { kind }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Outcome of a delivered message. `sent_at` marks when the delivery call
/// returned, not when the platform stored the message.
pub struct SendResult {
    pub id: String,
    pub channel: String,
    pub sent_at: DateTime<Utc>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
