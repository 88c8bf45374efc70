//! Article generation strategies
//!
//! This module provides:
//! - `MachineLearning`: clusters paragraphs by content and titles each cluster
//! - `Randomization`: shuffles paragraphs into fixed-size groups
//!
//! Both collect paragraphs through `add` and produce one rendered string per
//! article from `generate_articles`.

mod machine_learning;
mod randomization;

pub use machine_learning::MachineLearning;
pub use randomization::Randomization;

use zombie_types::{Article, HeaderStyle, Paragraph};

/// Trait for article generators
pub trait ArticleGenerator {
    /// Ingest one paragraph
    fn add(&mut self, paragraph: Paragraph);

    /// Build the articles without rendering them
    fn articles(&mut self) -> Vec<Article>;

    /// Framing used by `generate_articles`
    fn header_style(&self) -> HeaderStyle;

    /// Build and render every article
    fn generate_articles(&mut self) -> Vec<String> {
        let style = self.header_style();
        let articles = self.articles();
        tracing::debug!("Rendering {} articles with {} headers", articles.len(), style);
        articles
            .iter()
            .map(|article| article.render(style))
            .collect()
    }

    /// Number of ingested paragraphs, duplicates included
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
