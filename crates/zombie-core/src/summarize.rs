//! Extractive summarization
//!
//! Picks the sentences that share the most content with the rest of the
//! text. Sentences are embedded with the same vector space builder used for
//! clustering, and each is scored by the sum of its dot products with every
//! sentence, itself included.

use lazy_static::lazy_static;
use ndarray::Axis;
use regex::Regex;

use crate::space::{VectorSpace, VectorSpaceParams};

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]").unwrap();
}

/// Separator placed between sentences of a multi-sentence summary
pub const DEFAULT_SEPARATOR: &str = " [...] ";

/// Trait for summarizers
pub trait Summarizer: Send + Sync {
    /// Return the `count` most representative sentences of `text`
    fn summarize(&self, text: &str, count: usize) -> String;

    /// Name of this summarizer
    fn name(&self) -> &str;
}

/// Latent-semantic extractive summarizer
#[derive(Debug, Clone)]
pub struct LsiSummarizer {
    params: VectorSpaceParams,
    separator: String,
}

impl Default for LsiSummarizer {
    fn default() -> Self {
        Self {
            params: VectorSpaceParams::default(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl LsiSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: VectorSpaceParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// Sentence-like chunks with at least two words, trimmed
pub fn sentences(text: &str) -> Vec<String> {
    SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|chunk| chunk.split_whitespace().nth(1).is_some())
        .map(str::to_string)
        .collect()
}

impl Summarizer for LsiSummarizer {
    fn summarize(&self, text: &str, count: usize) -> String {
        if count == 0 {
            return String::new();
        }

        let chunks = sentences(text);
        match chunks.len() {
            0 => return String::new(),
            1 => return chunks.into_iter().next().unwrap_or_default(),
            _ => {}
        }

        let space = VectorSpace::build(&chunks, &self.params);
        let vectors = space.matrix_for(&chunks);
        let scores = vectors.dot(&vectors.t()).sum_axis(Axis(1));

        // sort_by is stable, so equal scores keep text order
        let mut ranked: Vec<usize> = (0..chunks.len()).collect();
        ranked.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(count);
        ranked.sort_unstable();

        tracing::trace!(
            "Summarized {} sentences down to {}",
            chunks.len(),
            ranked.len()
        );

        ranked
            .into_iter()
            .map(|i| chunks[i].as_str())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    fn name(&self) -> &str {
        "lsi"
    }
}
