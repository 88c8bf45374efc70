//! Markdown normalization
//!
//! Paragraph content arrives as Markdown (possibly with inline HTML). The
//! clustering pipeline only ever looks at the plain-text form; the original
//! markup is kept by the corpus for the final article body.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Opening or closing line of a fenced code block
    static ref FENCE: Regex = Regex::new(r"(?m)^[ \t]*(```|~~~).*$").unwrap();

    /// `![alt](src)` images carry no prose
    static ref IMAGE: Regex = Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap();

    /// `[text](url)` inline links
    static ref INLINE_LINK: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();

    /// `[text][ref]` reference links
    static ref REFERENCE_LINK: Regex = Regex::new(r"\[([^\]]*)\]\[[^\]]*\]").unwrap();

    /// `[ref]: url` link definitions
    static ref LINK_DEFINITION: Regex = Regex::new(r"(?m)^[ \t]*\[[^\]]+\]:[ \t]*\S+.*$").unwrap();

    /// `<https://...>` autolinks
    static ref AUTOLINK: Regex = Regex::new(r"<((?:https?|mailto):[^>\s]+)>").unwrap();

    /// Inline HTML tags
    static ref HTML_TAG: Regex = Regex::new(r"</?[A-Za-z][^>]*>").unwrap();

    /// ATX heading markers, opening and closing
    static ref HEADING_OPEN: Regex = Regex::new(r"(?m)^[ \t]{0,3}#{1,6}[ \t]+").unwrap();
    static ref HEADING_CLOSE: Regex = Regex::new(r"(?m)[ \t]+#+[ \t]*$").unwrap();

    /// Horizontal rules and setext underlines
    static ref RULE: Regex = Regex::new(r"(?m)^[ \t]*(?:(?:[-*_][ \t]*){3,}|=+)[ \t]*$").unwrap();

    /// Blockquote markers, nested ones included
    static ref BLOCKQUOTE: Regex = Regex::new(r"(?m)^[ \t]*(?:>[ \t]?)+").unwrap();

    /// Bullet and ordered list markers
    static ref LIST_MARKER: Regex = Regex::new(r"(?m)^[ \t]*(?:[-*+]|\d+[.)])[ \t]+").unwrap();

    static ref STRONG_STAR: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
    static ref STRONG_UNDERSCORE: Regex = Regex::new(r"__([^_]+)__").unwrap();
    static ref EMPHASIS_STAR: Regex = Regex::new(r"\*([^*\s][^*]*)\*").unwrap();
    static ref EMPHASIS_UNDERSCORE: Regex = Regex::new(r"\b_([^_]+)_\b").unwrap();
    static ref STRIKETHROUGH: Regex = Regex::new(r"~~([^~]+)~~").unwrap();
    static ref CODE_SPAN: Regex = Regex::new(r"`+([^`]*)`+").unwrap();

    /// Backslash escapes of Markdown punctuation
    static ref ESCAPE: Regex = Regex::new(r"\\([\\`*_{}\[\]()#+\-.!>~|])").unwrap();

    static ref SPACE_RUN: Regex = Regex::new(r"[ \t]+").unwrap();
}

/// HTML entities decoded after tags are stripped
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

/// Converts formatted paragraph content into the plain text used for
/// vectorization and as the corpus lookup key
pub trait TextNormalizer: Send + Sync {
    /// Produce the normalized form of `content`
    fn normalize(&self, content: &str) -> String;

    /// Get the name of this normalizer
    fn name(&self) -> &str;
}

/// Strips Markdown and inline HTML down to prose
///
/// Output lines are trimmed, runs of spaces collapsed, and blank lines
/// dropped, so two paragraphs differing only in markup map to the same text.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownStripper;

impl MarkdownStripper {
    /// Create a new stripper
    pub fn new() -> Self {
        Self
    }
}

impl TextNormalizer for MarkdownStripper {
    fn normalize(&self, content: &str) -> String {
        let text = FENCE.replace_all(content, "");
        let text = LINK_DEFINITION.replace_all(&text, "");
        let text = IMAGE.replace_all(&text, "");
        let text = INLINE_LINK.replace_all(&text, "$1");
        let text = REFERENCE_LINK.replace_all(&text, "$1");
        let text = AUTOLINK.replace_all(&text, "$1");
        let text = HTML_TAG.replace_all(&text, "");
        let text = HEADING_OPEN.replace_all(&text, "");
        let text = HEADING_CLOSE.replace_all(&text, "");
        let text = RULE.replace_all(&text, "");
        let text = BLOCKQUOTE.replace_all(&text, "");
        let text = LIST_MARKER.replace_all(&text, "");
        let text = STRONG_STAR.replace_all(&text, "$1");
        let text = STRONG_UNDERSCORE.replace_all(&text, "$1");
        let text = EMPHASIS_STAR.replace_all(&text, "$1");
        let text = EMPHASIS_UNDERSCORE.replace_all(&text, "$1");
        let text = STRIKETHROUGH.replace_all(&text, "$1");
        let text = CODE_SPAN.replace_all(&text, "$1");
        let text = ESCAPE.replace_all(&text, "$1");

        let mut text = text.into_owned();
        for (entity, replacement) in ENTITIES {
            text = text.replace(entity, replacement);
        }

        text.lines()
            .map(|line| SPACE_RUN.replace_all(line.trim(), " ").into_owned())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn name(&self) -> &str {
        "markdown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strip(content: &str) -> String {
        MarkdownStripper::new().normalize(content)
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(strip("Zombies shamble at dawn."), "Zombies shamble at dawn.");
    }

    #[test]
    fn test_emphasis_removed() {
        assert_eq!(
            strip("The **horde** is _hungry_ and *slow*."),
            "The horde is hungry and slow."
        );
    }

    #[test]
    fn test_links_keep_text() {
        assert_eq!(
            strip("Read [the report](https://example.com/r) or <https://example.com>."),
            "Read the report or https://example.com."
        );
    }

    #[test]
    fn test_images_dropped() {
        assert_eq!(strip("Before ![a zombie](z.png) after"), "Before after");
    }

    #[test]
    fn test_headings_and_lists() {
        assert_eq!(
            strip("## Outbreak ##\n\n- first\n- second\n1. third"),
            "Outbreak\nfirst\nsecond\nthird"
        );
    }

    #[test]
    fn test_blockquote_and_rule() {
        assert_eq!(strip("> quoted\n> > nested\n\n---\n\nend"), "quoted\nnested\nend");
    }

    #[test]
    fn test_html_and_entities() {
        assert_eq!(
            strip("<p>Fish &amp; chips</p> <br/>served"),
            "Fish & chips served"
        );
    }

    #[test]
    fn test_code_spans() {
        assert_eq!(strip("Call `infect()` twice"), "Call infect() twice");
    }

    #[test]
    fn test_snake_case_survives() {
        assert_eq!(strip("the brain_count field"), "the brain_count field");
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(strip(""), "");
        assert_eq!(strip("   \n\n  "), "");
    }

    #[test]
    fn test_markup_variants_collide() {
        assert_eq!(strip("Run **now**"), strip("Run now"));
    }
}
