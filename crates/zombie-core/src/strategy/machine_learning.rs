use zombie_types::{Article, HeaderStyle, Paragraph, ZombieError};

use super::ArticleGenerator;
use crate::article::ArticleAssembler;
use crate::cluster::{desired_clusters_with, ClusterEngine, ClusterParams, Clustering, Point};
use crate::config::PipelineConfig;
use crate::corpus::{Corpus, KeyMode};
use crate::normalize::{MarkdownStripper, TextNormalizer};
use crate::space::{VectorSpace, VectorSpaceParams};
use crate::summarize::{LsiSummarizer, Summarizer};

/// Content-based article generator
///
/// Paragraphs are keyed by their normalized text, embedded in a TF-IDF /
/// LSI vector space and clustered with k-means. Each cluster becomes one
/// article, titled by its most representative sentence.
pub struct MachineLearning {
    config: PipelineConfig,
    corpus: Corpus,
    normalizer: Box<dyn TextNormalizer>,
    summarizer: Box<dyn Summarizer>,
    engine: ClusterEngine,
}

impl Default for MachineLearning {
    fn default() -> Self {
        Self::new()
    }
}

impl MachineLearning {
    /// Create a generator with the default configuration
    pub fn new() -> Self {
        let config = PipelineConfig::default();
        let summarizer = LsiSummarizer::new().with_params(space_params(&config));
        Self::build(config, Box::new(MarkdownStripper), Box::new(summarizer))
    }

    pub fn with_config(config: PipelineConfig) -> Result<Self, ZombieError> {
        let summarizer = LsiSummarizer::new().with_params(space_params(&config));
        Self::with_parts(config, Box::new(MarkdownStripper), Box::new(summarizer))
    }

    /// Create a generator with a custom normalizer and summarizer
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
        let params = ClusterParams {
            runs: config.runs,
            max_iterations: config.max_iterations,
        };
        let engine = ClusterEngine::new(params, config.rng());

        Self {
            corpus: Corpus::new(KeyMode::Normalized),
            config,
            normalizer,
            summarizer,
            engine,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Embed the corpus and cluster it
    pub fn cluster(&mut self) -> Clustering {
        let labels = self.corpus.labels();
        let space = VectorSpace::build(labels, &space_params(&self.config));
        let points: Vec<Point> = labels
            .iter()
            .zip(space.vectors_for(labels))
            .map(|(label, vector)| Point::new(label.clone(), vector))
            .collect();

        let k = desired_clusters_with(points.len(), self.config.paragraphs_per_article);
        tracing::info!(
            "Clustering {} paragraphs into {} clusters ({} dimensions)",
            points.len(),
            k,
            space.dimension()
        );

        self.engine.cluster(k, points)
    }
}

fn space_params(config: &PipelineConfig) -> VectorSpaceParams {
    VectorSpaceParams {
        lsi_cutoff: config.lsi_cutoff,
    }
}

impl ArticleGenerator for MachineLearning {
    fn add(&mut self, paragraph: Paragraph) {
        self.corpus.add(&paragraph, self.normalizer.as_ref());
    }

    fn articles(&mut self) -> Vec<Article> {
        if self.corpus.is_empty() {
            tracing::info!("No paragraphs to cluster");
            return Vec::new();
        }

        let clustering = self.cluster();
        let assembler = ArticleAssembler::new(
            &self.corpus,
            self.normalizer.as_ref(),
            self.summarizer.as_ref(),
        );

        clustering
            .clusters
            .iter()
            .map(|cluster| assembler.assemble(cluster.id, &cluster.labels()))
            .collect()
    }

    fn header_style(&self) -> HeaderStyle {
        self.config.header_style.unwrap_or(HeaderStyle::Html)
    }

    fn len(&self) -> usize {
        self.corpus.len()
    }
}
