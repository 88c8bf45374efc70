use zombie_types::Article;

use crate::corpus::Corpus;
use crate::normalize::TextNormalizer;
use crate::summarize::Summarizer;

/// Separator between paragraphs, both in summarization input and in bodies
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Builds an article from a group of corpus labels
pub struct ArticleAssembler<'a> {
    corpus: &'a Corpus,
    normalizer: &'a dyn TextNormalizer,
    summarizer: &'a dyn Summarizer,
}

impl<'a> ArticleAssembler<'a> {
    pub fn new(
        corpus: &'a Corpus,
        normalizer: &'a dyn TextNormalizer,
        summarizer: &'a dyn Summarizer,
    ) -> Self {
        Self {
            corpus,
            normalizer,
            summarizer,
        }
    }

    /// Plain text fed to the summarizer
    pub fn summarization_input(&self, members: &[String]) -> String {
        members
            .iter()
            .map(|label| self.corpus.plain_text(label, self.normalizer))
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }

    /// Original paragraphs with their citations
    pub fn body(&self, members: &[String]) -> String {
        members
            .iter()
            .map(|label| self.corpus.cited_content(label))
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }

    pub fn assemble(&self, index: usize, members: &[String]) -> Article {
        let title = self
            .summarizer
            .summarize(&self.summarization_input(members), 1);

        tracing::debug!(
            "Article {}: {} paragraphs, title {:?}",
            index,
            members.len(),
            title
        );

        Article {
            index,
            title,
            body: self.body(members),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::KeyMode;
    use crate::normalize::MarkdownStripper;
    use crate::summarize::LsiSummarizer;
    use pretty_assertions::assert_eq;
    use zombie_types::{HeaderStyle, Paragraph};

    /// Returns the first line of its input, for predictable titles
    struct FirstLine;

    impl Summarizer for FirstLine {
        fn summarize(&self, text: &str, _count: usize) -> String {
            text.lines().next().unwrap_or_default().to_string()
        }

        fn name(&self) -> &str {
            "first-line"
        }
    }

    #[test]
    fn test_assemble_normalized_corpus() {
        let mut corpus = Corpus::new(KeyMode::Normalized);
        corpus.add(
            &Paragraph::new("**Brains** are scarce.").with_source_text("Gazette"),
            &MarkdownStripper,
        );
        corpus.add(&Paragraph::new("The horde moves _east_."), &MarkdownStripper);

        let assembler = ArticleAssembler::new(&corpus, &MarkdownStripper, &FirstLine);
        let article = assembler.assemble(3, corpus.labels());

        assert_eq!(
            assembler.summarization_input(corpus.labels()),
            "Brains are scarce.\n\nThe horde moves east."
        );
        assert_eq!(article.index, 3);
        assert_eq!(article.title, "Brains are scarce.");
        assert_eq!(
            article.body,
            "**Brains** are scarce.---Gazette\n\nThe horde moves _east_."
        );
        assert_eq!(
            article.render(HeaderStyle::Html),
            "<h2>3 - Brains are scarce.</h2>\n**Brains** are scarce.---Gazette\n\nThe horde moves _east_.\n"
        );
    }

    #[test]
    fn test_assemble_verbatim_corpus() {
        let mut corpus = Corpus::new(KeyMode::Verbatim);
        corpus.add(&Paragraph::new("# Night falls over the town"), &MarkdownStripper);

        let assembler = ArticleAssembler::new(&corpus, &MarkdownStripper, &FirstLine);
        let article = assembler.assemble(0, corpus.labels());

        assert_eq!(article.title, "Night falls over the town");
        assert_eq!(article.body, "# Night falls over the town");
    }

    #[test]
    fn test_lsi_title_comes_from_members() {
        let mut corpus = Corpus::new(KeyMode::Normalized);
        corpus.add(&Paragraph::new("Zombies crave fresh brains."), &MarkdownStripper);
        corpus.add(&Paragraph::new("Fresh brains attract zombies."), &MarkdownStripper);

        let summarizer = LsiSummarizer::new();
        let assembler = ArticleAssembler::new(&corpus, &MarkdownStripper, &summarizer);
        let article = assembler.assemble(0, corpus.labels());

        assert!(
            article.title == "Zombies crave fresh brains"
                || article.title == "Fresh brains attract zombies",
            "unexpected title: {}",
            article.title
        );
    }
}
