//! Configuration management for the article pipeline
//!
//! Handles clustering, grouping and output framing parameters, plus the
//! random source used by both strategies.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::str::FromStr;
use zombie_types::{HeaderStyle, ZombieError};

/// Number of independent k-means restarts
pub const DEFAULT_RUNS: usize = 10;

/// Iteration cap for a single k-means run
pub const DEFAULT_MAX_ITERATIONS: usize = 300;

/// Target number of paragraphs per generated article
pub const DEFAULT_PARAGRAPHS_PER_ARTICLE: usize = 5;

/// Share of singular values kept by the latent-semantic projection
pub const DEFAULT_LSI_CUTOFF: f64 = 0.75;

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Number of k-means restarts; the lowest-inertia run wins
    pub runs: usize,
    /// Iteration cap per k-means run
    pub max_iterations: usize,
    /// Divisor of the cluster count heuristic and size of random groups
    pub paragraphs_per_article: usize,
    /// LSI cutoff in (0, 1]; `None` clusters on plain TF-IDF vectors
    pub lsi_cutoff: Option<f64>,
    /// Fixed seed for reproducible output; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Header framing; `None` uses the strategy's default
    pub header_style: Option<HeaderStyle>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            paragraphs_per_article: DEFAULT_PARAGRAPHS_PER_ARTICLE,
            lsi_cutoff: Some(DEFAULT_LSI_CUTOFF),
            seed: None,
            header_style: None,
        }
    }
}

impl PipelineConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the random source
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of k-means restarts
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    /// Set the per-run iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the target article size
    pub fn with_paragraphs_per_article(mut self, paragraphs: usize) -> Self {
        self.paragraphs_per_article = paragraphs;
        self
    }

    /// Set or disable the LSI projection
    pub fn with_lsi_cutoff(mut self, cutoff: Option<f64>) -> Self {
        self.lsi_cutoff = cutoff;
        self
    }

    /// Override the header framing
    pub fn with_header_style(mut self, style: HeaderStyle) -> Self {
        self.header_style = Some(style);
        self
    }

    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<(), ZombieError> {
        if self.runs == 0 {
            return Err(ZombieError::InvalidConfig("runs must be at least 1".to_string()));
        }
        if self.max_iterations == 0 {
            return Err(ZombieError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if self.paragraphs_per_article == 0 {
            return Err(ZombieError::InvalidConfig(
                "paragraphs_per_article must be at least 1".to_string(),
            ));
        }
        if let Some(cutoff) = self.lsi_cutoff {
            if !(cutoff > 0.0 && cutoff <= 1.0) {
                return Err(ZombieError::InvalidConfig(format!(
                    "lsi_cutoff must be in (0, 1], got {}",
                    cutoff
                )));
            }
        }
        Ok(())
    }

    /// Build the random source described by this configuration
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Expected variables (all optional):
    /// - ZOMBIE_RUNS: k-means restarts (default: 10)
    /// - ZOMBIE_MAX_ITERATIONS: per-run iteration cap (default: 300)
    /// - ZOMBIE_PARAGRAPHS_PER_ARTICLE: article size target (default: 5)
    /// - ZOMBIE_LSI_CUTOFF: LSI cutoff, or "none" to disable (default: 0.75)
    /// - ZOMBIE_SEED: fixed seed (default: OS entropy)
    /// - ZOMBIE_HEADER_STYLE: "html" or "markdown" (default: per strategy)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(runs) = parse_var(&lookup, "ZOMBIE_RUNS")? {
            config.runs = runs;
        }
        if let Some(max_iterations) = parse_var(&lookup, "ZOMBIE_MAX_ITERATIONS")? {
            config.max_iterations = max_iterations;
        }
        if let Some(paragraphs) = parse_var(&lookup, "ZOMBIE_PARAGRAPHS_PER_ARTICLE")? {
            config.paragraphs_per_article = paragraphs;
        }
        if let Some(raw) = lookup("ZOMBIE_LSI_CUTOFF") {
            config.lsi_cutoff = match raw.trim().to_lowercase().as_str() {
                "none" | "off" => None,
                value => Some(value.parse::<f64>().map_err(|_| ZombieError::EnvVar {
                    name: "ZOMBIE_LSI_CUTOFF".to_string(),
                    value: raw.clone(),
                })?),
            };
        }
        if let Some(seed) = parse_var(&lookup, "ZOMBIE_SEED")? {
            config.seed = Some(seed);
        }
        if let Some(style) = parse_var::<HeaderStyle>(&lookup, "ZOMBIE_HEADER_STYLE")? {
            config.header_style = Some(style);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<Option<T>, ZombieError> {
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ZombieError::EnvVar {
                name: name.to_string(),
                value: raw,
            }),
    }
}
