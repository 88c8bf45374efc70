//! Vector space module - Turns normalized paragraphs into comparable vectors
//!
//! This module provides:
//! - Tokenization and TF-IDF term weighting
//! - An optional latent-semantic (LSI) projection
//! - L2 normalization, so Euclidean distance tracks cosine similarity
//!
//! The builder never fails: an empty vocabulary degenerates to zero vectors
//! and an empty corpus to an empty space.

pub mod lsi;
pub mod terms;

pub use terms::{tokenize, TermMatrix};

use std::collections::HashMap;

use ndarray::{Array2, ArrayView1};

use crate::config::DEFAULT_LSI_CUTOFF;

/// Vector space construction parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorSpaceParams {
    /// Share of singular values kept; `None` skips the projection
    pub lsi_cutoff: Option<f64>,
}

impl Default for VectorSpaceParams {
    fn default() -> Self {
        Self {
            lsi_cutoff: Some(DEFAULT_LSI_CUTOFF),
        }
    }
}

/// Owned mapping from normalized text to its unit-length vector
#[derive(Debug, Clone)]
pub struct VectorSpace {
    dimension: usize,
    vectors: HashMap<String, Vec<f64>>,
}

impl VectorSpace {
    /// Build the space over a sequence of normalized strings
    ///
    /// Duplicate strings share one vector. Every vector has the same
    /// dimension, which is at least 1 whenever `documents` is non-empty.
    pub fn build(documents: &[String], params: &VectorSpaceParams) -> Self {
        let mut distinct: Vec<&str> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for doc in documents {
            if seen.insert(doc.as_str()) {
                distinct.push(doc.as_str());
            }
        }

        if distinct.is_empty() {
            return Self {
                dimension: 0,
                vectors: HashMap::new(),
            };
        }

        let tokens: Vec<Vec<String>> = distinct.iter().map(|d| tokenize(d)).collect();
        let matrix = TermMatrix::build(&tokens);

        tracing::debug!(
            "Building vector space: {} documents, {} terms",
            distinct.len(),
            matrix.vocabulary_len()
        );

        let rows = match params.lsi_cutoff {
            Some(cutoff) => lsi::project(&matrix.rows, cutoff),
            None if matrix.vocabulary_len() == 0 => Array2::zeros((distinct.len(), 1)),
            None => matrix.rows,
        };

        let dimension = rows.ncols();
        let vectors = distinct
            .into_iter()
            .zip(rows.outer_iter())
            .map(|(doc, row)| (doc.to_string(), l2_normalize(row.to_vec())))
            .collect();

        Self { dimension, vectors }
    }

    /// Length of every vector in the space
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of distinct documents
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector for a normalized string
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.vectors.get(key).map(Vec::as_slice)
    }

    /// Vectors for a label sequence, in order; unknown labels map to zero
    pub fn vectors_for(&self, labels: &[String]) -> Vec<Vec<f64>> {
        labels
            .iter()
            .map(|label| {
                self.get(label)
                    .map(<[f64]>::to_vec)
                    .unwrap_or_else(|| vec![0.0; self.dimension.max(1)])
            })
            .collect()
    }

    /// Vectors for a label sequence stacked as matrix rows
    pub fn matrix_for(&self, labels: &[String]) -> Array2<f64> {
        let dimension = self.dimension.max(1);
        let mut matrix = Array2::zeros((labels.len(), dimension));
        for (mut row, label) in matrix.outer_iter_mut().zip(labels) {
            if let Some(vector) = self.get(label) {
                row.assign(&ArrayView1::from(vector));
            }
        }
        matrix
    }
}

/// Scale a vector to unit length; the zero vector is returned unchanged
pub fn l2_normalize(mut vector: Vec<f64>) -> Vec<f64> {
    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
    vector
}
