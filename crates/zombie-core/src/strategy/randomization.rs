use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use zombie_types::{Article, HeaderStyle, Paragraph, ZombieError};

use super::ArticleGenerator;
use crate::article::ArticleAssembler;
use crate::config::PipelineConfig;
use crate::corpus::{Corpus, KeyMode};
use crate::normalize::{MarkdownStripper, TextNormalizer};
use crate::space::VectorSpaceParams;
use crate::summarize::{LsiSummarizer, Summarizer};

/// Fallback article generator
///
/// Shuffles paragraphs and slices them into groups of
/// `paragraphs_per_article`; the last group takes the remainder. Paragraphs
/// are keyed by their original content and only normalized for titling.
pub struct Randomization {
    config: PipelineConfig,
    corpus: Corpus,
    normalizer: Box<dyn TextNormalizer>,
    summarizer: Box<dyn Summarizer>,
    rng: StdRng,
}

impl Default for Randomization {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomization {
    pub fn new() -> Self {
        let config = PipelineConfig::default();
        let summarizer = default_summarizer(&config);
        Self::build(config, Box::new(MarkdownStripper), Box::new(summarizer))
    }

    pub fn with_config(config: PipelineConfig) -> Result<Self, ZombieError> {
        let summarizer = default_summarizer(&config);
        Self::with_parts(config, Box::new(MarkdownStripper), Box::new(summarizer))
    }

    pub fn with_parts(
        config: PipelineConfig,
        normalizer: Box<dyn TextNormalizer>,
        summarizer: Box<dyn Summarizer>,
    ) -> Result<Self, ZombieError> {
        config.validate()?;
        Ok(Self::build(config, normalizer, summarizer))
    }

    fn build(
        config: PipelineConfig,
        normalizer: Box<dyn TextNormalizer>,
        summarizer: Box<dyn Summarizer>,
    ) -> Self {
        Self {
            rng: config.rng(),
            corpus: Corpus::new(KeyMode::Verbatim),
            config,
            normalizer,
            summarizer,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Shuffle the labels and slice them into article-sized groups
    pub fn groups(&mut self) -> Vec<Vec<String>> {
        let mut labels = self.corpus.labels().to_vec();
        labels.shuffle(&mut self.rng);

        labels
            .chunks(self.config.paragraphs_per_article.max(1))
            .map(<[String]>::to_vec)
            .collect()
    }
}

fn default_summarizer(config: &PipelineConfig) -> LsiSummarizer {
    LsiSummarizer::new().with_params(VectorSpaceParams {
        lsi_cutoff: config.lsi_cutoff,
    })
}

impl ArticleGenerator for Randomization {
    fn add(&mut self, paragraph: Paragraph) {
        self.corpus.add(&paragraph, self.normalizer.as_ref());
    }

    fn articles(&mut self) -> Vec<Article> {
        let groups = self.groups();
        tracing::info!(
            "Grouping {} paragraphs into {} random articles",
            self.corpus.len(),
            groups.len()
        );

        let assembler = ArticleAssembler::new(
            &self.corpus,
            self.normalizer.as_ref(),
            self.summarizer.as_ref(),
        );

        groups
            .iter()
            .enumerate()
            .map(|(index, members)| assembler.assemble(index, members))
            .collect()
    }

    fn header_style(&self) -> HeaderStyle {
        self.config.header_style.unwrap_or(HeaderStyle::Markdown)
    }

    fn len(&self) -> usize {
        self.corpus.len()
    }
}
