//! Block Kit wire types produced by message translation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Text composition object embedded in headers and sections.
pub enum SlackTextObject {
    PlainText { text: String },
    Mrkdwn { text: String },
}

impl SlackTextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Enumerates the Block Kit layout blocks the bridge emits.
///
/// A section carries either a single `text` or a `fields` list, never both.
pub enum SlackBlock {
    Header {
        text: SlackTextObject,
    },
    Section {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<SlackTextObject>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        fields: Vec<SlackTextObject>,
    },
    Divider,
}

impl SlackBlock {
    pub fn header(text: impl Into<String>) -> Self {
        Self::Header {
            text: SlackTextObject::plain(text),
        }
    }

    pub fn section_text(text: impl Into<String>) -> Self {
        Self::Section {
            text: Some(SlackTextObject::mrkdwn(text)),
            fields: Vec::new(),
        }
    }

    pub fn section_fields(fields: impl IntoIterator<Item = String>) -> Self {
        Self::Section {
            text: None,
            fields: fields.into_iter().map(SlackTextObject::mrkdwn).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::SlackBlock;

    #[test]
    fn unit_blocks_serialize_to_block_kit_shapes() {
        let blocks = vec![
            SlackBlock::header("Alert"),
            SlackBlock::section_text("*bold*"),
            SlackBlock::section_fields(vec!["*A*\n1".to_string()]),
            SlackBlock::Divider,
        ];
        assert_eq!(
            serde_json::to_value(&blocks).expect("serialize blocks"),
            json!([
                { "type": "header", "text": { "type": "plain_text", "text": "Alert" } },
                { "type": "section", "text": { "type": "mrkdwn", "text": "*bold*" } },
                { "type": "section", "fields": [{ "type": "mrkdwn", "text": "*A*\n1" }] },
                { "type": "divider" }
            ])
        );
    }
}
