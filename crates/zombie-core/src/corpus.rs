use std::borrow::Cow;
use std::collections::HashMap;

use zombie_types::{citation, Paragraph};

use crate::normalize::TextNormalizer;

/// How paragraphs are keyed when they enter the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// Key by normalized text; normalization happens at ingestion
    Normalized,
    /// Key by the original content; normalization is deferred to summarization
    Verbatim,
}

/// Ordered collection of ingested paragraphs
///
/// `labels` keeps one entry per `add` call, in insertion order. The two
/// lookup tables are keyed so that a later paragraph with the same key
/// overwrites the stored content and citation of an earlier one.
#[derive(Debug, Clone)]
pub struct Corpus {
    mode: KeyMode,
    labels: Vec<String>,
    content_by_key: HashMap<String, String>,
    citation_by_key: HashMap<String, String>, // keyed by original content
}

impl Corpus {
    pub fn new(mode: KeyMode) -> Self {
        Self {
            mode,
            labels: Vec::new(),
            content_by_key: HashMap::new(),
            citation_by_key: HashMap::new(),
        }
    }

    /// Ingest one paragraph
    pub fn add(&mut self, paragraph: &Paragraph, normalizer: &dyn TextNormalizer) {
        let content = paragraph.content.clone();
        let key = match self.mode {
            KeyMode::Normalized => normalizer.normalize(&content),
            KeyMode::Verbatim => content.clone(),
        };

        if self.content_by_key.contains_key(&key) {
            tracing::trace!("Key collision, later paragraph wins: {:?}", key);
        }

        self.citation_by_key.insert(content.clone(), citation(paragraph));
        self.content_by_key.insert(key.clone(), content);
        self.labels.push(key);
    }

    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    /// Keys in insertion order, duplicates included
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Original content stored for a key
    pub fn content(&self, key: &str) -> Option<&str> {
        self.content_by_key.get(key).map(String::as_str)
    }

    /// Citation stored for a piece of original content
    pub fn citation(&self, content: &str) -> Option<&str> {
        self.citation_by_key.get(content).map(String::as_str)
    }

    /// Original content followed by its citation
    pub fn cited_content(&self, key: &str) -> String {
        let content = self.content(key).unwrap_or(key);
        let citation = self.citation(content).unwrap_or("");
        format!("{}{}", content, citation)
    }

    /// Plain text of a label, as fed to the summarizer
    pub fn plain_text<'a>(&self, key: &'a str, normalizer: &dyn TextNormalizer) -> Cow<'a, str> {
        match self.mode {
            KeyMode::Normalized => Cow::Borrowed(key),
            KeyMode::Verbatim => Cow::Owned(normalizer.normalize(key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::MarkdownStripper;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_normalized() {
        let mut corpus = Corpus::new(KeyMode::Normalized);
        assert_eq!(corpus.mode(), KeyMode::Normalized);
        let p = Paragraph::new("The **horde** arrives.").with_source_text("Gazette");
        corpus.add(&p, &MarkdownStripper);

        assert_eq!(corpus.labels(), &["The horde arrives.".to_string()]);
        assert_eq!(corpus.content("The horde arrives."), Some("The **horde** arrives."));
        assert_eq!(corpus.citation("The **horde** arrives."), Some("---Gazette"));
        assert_eq!(
            corpus.cited_content("The horde arrives."),
            "The **horde** arrives.---Gazette"
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut corpus = Corpus::new(KeyMode::Normalized);
        corpus.add(
            &Paragraph::new("Run **now**").with_source_text("First"),
            &MarkdownStripper,
        );
        corpus.add(
            &Paragraph::new("Run _now_").with_source_url("https://second.example"),
            &MarkdownStripper,
        );

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.labels()[0], corpus.labels()[1]);
        assert_eq!(corpus.content("Run now"), Some("Run _now_"));
        assert_eq!(
            corpus.cited_content("Run now"),
            "Run _now_---[https://second.example](https://second.example)"
        );
    }

    #[test]
    fn test_empty_paragraphs_collapse() {
        let mut corpus = Corpus::new(KeyMode::Normalized);
        corpus.add(&Paragraph::new(""), &MarkdownStripper);
        corpus.add(&Paragraph::new("   "), &MarkdownStripper);

        assert_eq!(corpus.labels(), &["".to_string(), "".to_string()]);
        assert_eq!(corpus.content(""), Some("   "));
    }

    #[test]
    fn test_verbatim_defers_normalization() {
        let mut corpus = Corpus::new(KeyMode::Verbatim);
        assert_eq!(corpus.mode(), KeyMode::Verbatim);
        corpus.add(&Paragraph::new("Brains, *please*."), &MarkdownStripper);

        assert_eq!(corpus.labels(), &["Brains, *please*.".to_string()]);
        assert_eq!(
            corpus.plain_text("Brains, *please*.", &MarkdownStripper),
            "Brains, please."
        );
        assert_eq!(corpus.cited_content("Brains, *please*."), "Brains, *please*.");
    }
}
