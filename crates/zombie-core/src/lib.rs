//! Zombie Core - Clustering and summarization pipeline for composite articles
//!
//! This crate provides:
//! - Markdown normalization of paragraph content
//! - The paragraph corpus with citation lookup
//! - A TF-IDF / latent-semantic vector space
//! - Multi-run k-means clustering with a data-driven cluster count
//! - Extractive title summarization
//! - Article assembly for the ML and random-grouping strategies
//! - Configuration management

pub mod article;
pub mod cluster;
pub mod config;
pub mod corpus;
pub mod normalize;
pub mod space;
pub mod strategy;
pub mod summarize;

// Re-export commonly used types
pub use article::ArticleAssembler;
pub use cluster::{
    desired_clusters, desired_clusters_with, Cluster, ClusterEngine, ClusterParams, Clustering,
    Point,
};
pub use config::PipelineConfig;
pub use corpus::{Corpus, KeyMode};
pub use normalize::{MarkdownStripper, TextNormalizer};
pub use space::{VectorSpace, VectorSpaceParams};
pub use strategy::{ArticleGenerator, MachineLearning, Randomization};
pub use summarize::{LsiSummarizer, Summarizer};
pub use zombie_types::{citation, Article, HeaderStyle, Paragraph, ZombieError};
