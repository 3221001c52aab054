//! Translation of generic messages into Block Kit blocks.

use std::sync::OnceLock;

use herald_core::{ContentBlock, Message, SectionField};
use regex::Regex;

use crate::block_kit::SlackBlock;

const MARKDOWN_LINK_PATTERN: &str = r"\[(.*?)\]\((.*?)\)";

fn markdown_link_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(MARKDOWN_LINK_PATTERN).expect("markdown link pattern must compile")
    })
}

/// Rewrites every `[label](url)` occurrence to Slack's `<url|label>` form.
///
/// Text outside a match is copied through untouched and nothing is escaped.
pub fn rewrite_markdown_links(text: &str) -> String {
    markdown_link_regex()
        .replace_all(text, "<${2}|${1}>")
        .into_owned()
}

/// Builds the Block Kit blocks for `message`, in input block order.
///
/// Falls back to a single section holding `body` only when no block survived
/// translation, so a message made purely of unsupported blocks still renders
/// its body.
pub fn translate_message(message: &Message) -> Vec<SlackBlock> {
    let mut blocks = message
        .blocks
        .iter()
        .filter_map(translate_block)
        .collect::<Vec<_>>();
    if blocks.is_empty() && !message.body.is_empty() {
        blocks.push(SlackBlock::section_text(rewrite_markdown_links(
            &message.body,
        )));
    }
    blocks
}

fn translate_block(block: &ContentBlock) -> Option<SlackBlock> {
    match block {
        ContentBlock::Header { text } => Some(SlackBlock::header(text.clone())),
        ContentBlock::SectionText { text } => {
            Some(SlackBlock::section_text(rewrite_markdown_links(text)))
        }
        ContentBlock::SectionFields { fields } if fields.is_empty() => None,
        ContentBlock::SectionFields { fields } => Some(SlackBlock::section_fields(
            fields.iter().map(render_section_field),
        )),
        ContentBlock::Divider => Some(SlackBlock::Divider),
        ContentBlock::Unsupported { .. } => None,
    }
}

fn render_section_field(field: &SectionField) -> String {
    format!(
        "*{}*\n{}",
        field.label,
        rewrite_markdown_links(&field.value)
    )
}

#[cfg(test)]
mod tests {
    use herald_core::{ContentBlock, Message};

    use super::{rewrite_markdown_links, translate_message};
    use crate::block_kit::{SlackBlock, SlackTextObject};

    #[test]
    fn unit_rewrite_markdown_links_converts_single_link() {
        assert_eq!(
            rewrite_markdown_links("Hello [world](http://example.com)"),
            "Hello <http://example.com|world>"
        );
    }

    #[test]
    fn unit_rewrite_markdown_links_converts_each_link_and_keeps_gaps() {
        assert_eq!(
            rewrite_markdown_links("Check [this](http://a.com) and [that](http://b.com)"),
            "Check <http://a.com|this> and <http://b.com|that>"
        );
    }

    #[test]
    fn unit_rewrite_markdown_links_is_identity_without_links() {
        for text in [
            "No links here",
            "",
            "brackets [only] and (parens) <kept|as-is>",
            "[label] (url) with a space",
        ] {
            assert_eq!(rewrite_markdown_links(text), text);
        }
    }

    #[test]
    fn regression_rewrite_markdown_links_handles_empty_parts_and_first_close_paren() {
        assert_eq!(rewrite_markdown_links("[]()"), "<|>");
        assert_eq!(
            rewrite_markdown_links("[wiki](http://x/a_(b))"),
            "<http://x/a_(b|wiki>)"
        );
    }

    #[test]
    fn functional_translate_message_maps_blocks_in_order() {
        let message = Message::text("C1", "ignored body").with_blocks(vec![
            ContentBlock::header("Deploy [v2](http://x)"),
            ContentBlock::section("See [runbook](http://rb)"),
            ContentBlock::Divider,
            ContentBlock::section("tail"),
        ]);
        assert_eq!(
            translate_message(&message),
            vec![
                SlackBlock::header("Deploy [v2](http://x)"),
                SlackBlock::section_text("See <http://rb|runbook>"),
                SlackBlock::Divider,
                SlackBlock::section_text("tail"),
            ]
        );
    }

    #[test]
    fn functional_translate_message_emits_one_section_for_all_fields() {
        let message = Message::text("C1", "").with_blocks(vec![ContentBlock::fields([
            ("Environment", "prod"),
            ("Status", "Firing"),
            ("Link", "[Open](https://example.com)"),
        ])]);
        let blocks = translate_message(&message);
        assert_eq!(blocks.len(), 1);
        let SlackBlock::Section { text, fields } = &blocks[0] else {
            panic!("expected section block, got {:?}", blocks[0]);
        };
        assert!(text.is_none());
        assert_eq!(
            fields,
            &vec![
                SlackTextObject::mrkdwn("*Environment*\nprod"),
                SlackTextObject::mrkdwn("*Status*\nFiring"),
                SlackTextObject::mrkdwn("*Link*\n<https://example.com|Open>"),
            ]
        );
    }

    #[test]
    fn functional_translate_message_falls_back_to_rewritten_body() {
        let message = Message::text("C1", "hi [link](http://x)");
        assert_eq!(
            translate_message(&message),
            vec![SlackBlock::section_text("hi <http://x|link>")]
        );
    }

    #[test]
    fn unit_translate_message_without_blocks_or_body_is_empty() {
        assert!(translate_message(&Message::text("C1", "")).is_empty());
    }

    #[test]
    fn regression_translate_message_falls_back_when_only_unsupported_blocks() {
        let message = Message::text("C1", "fallback").with_blocks(vec![
            ContentBlock::Unsupported {
                kind: "image".to_string(),
            },
        ]);
        assert_eq!(
            translate_message(&message),
            vec![SlackBlock::section_text("fallback")]
        );
    }

    #[test]
    fn regression_translate_message_skips_field_section_without_fields() {
        let message = Message::text("C1", "fallback").with_blocks(vec![
            ContentBlock::SectionFields { fields: Vec::new() },
        ]);
        assert_eq!(
            translate_message(&message),
            vec![SlackBlock::section_text("fallback")]
        );
    }
}
