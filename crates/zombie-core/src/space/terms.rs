//! Tokenization and TF-IDF weighting

use std::collections::{BTreeMap, HashSet};

use ndarray::Array2;

/// English function words that carry no topical signal
pub const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "and", "any", "are", "because",
    "been", "before", "being", "below", "between", "both", "but", "can", "could", "did", "does",
    "doing", "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
    "having", "her", "here", "hers", "herself", "him", "himself", "his", "how", "into", "its",
    "itself", "just", "more", "most", "not", "now", "off", "once", "only", "other", "our",
    "ours", "ourselves", "out", "over", "own", "same", "she", "should", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they",
    "this", "those", "through", "too", "under", "until", "very", "was", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Lowercase word tokens longer than two characters, stop words removed
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() > 2)
        .map(|t| t.to_lowercase())
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .collect()
}

/// Dense TF-IDF document-term matrix
///
/// `tf = count / tokens_in_document`, `idf = ln(N / df) + 1`. Columns follow
/// the sorted vocabulary so the matrix is identical across runs.
#[derive(Debug, Clone)]
pub struct TermMatrix {
    pub vocabulary: Vec<String>,
    /// One row per document, one column per vocabulary term
    pub rows: Array2<f64>,
}

impl TermMatrix {
    pub fn build(documents: &[Vec<String>]) -> Self {
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in documents {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        let column: BTreeMap<&str, usize> = df.keys().enumerate().map(|(i, t)| (*t, i)).collect();
        let n_docs = documents.len() as f64;

        let mut rows = Array2::<f64>::zeros((documents.len(), column.len()));
        for (mut row, tokens) in rows.outer_iter_mut().zip(documents) {
            if tokens.is_empty() {
                continue;
            }
            for token in tokens {
                row[column[token.as_str()]] += 1.0;
            }
            let total = tokens.len() as f64;
            for (term, &col) in &column {
                if row[col] > 0.0 {
                    let idf = (n_docs / df[term] as f64).ln() + 1.0;
                    row[col] = row[col] / total * idf;
                }
            }
        }

        Self {
            vocabulary: df.keys().map(|t| t.to_string()).collect(),
            rows,
        }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}
