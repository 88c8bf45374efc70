//! Latent semantic projection
//!
//! The document-term matrix `D` (n × t) is reduced through the eigen
//! decomposition of its Gram matrix `D·Dᵀ` (n × n). With `D = U·Σ·Vᵀ`, the
//! eigenvectors of the Gram matrix are the columns of `U` and its eigenvalues
//! are `σ²`. A document's coordinates in the reduced space are `σᵢ·Uⱼᵢ`; since
//! `V` is orthonormal, distances between these coordinates equal distances
//! between the rank-reduced reconstructions of the documents in term space.
//! Working on the n × n Gram matrix keeps the decomposition small, because
//! corpora have far fewer paragraphs than distinct terms.

use linfa_linalg::eigh::Eigh;
use ndarray::{Array2, Axis};

/// Singular values at or below this are treated as zero
const SINGULAR_EPSILON: f64 = 1e-9;

/// Project document rows into the latent space
///
/// Keeps the `max(1, round(n · cutoff))` largest singular values that are
/// non-zero. Returns one coordinate row per document; if no singular value
/// survives (empty vocabulary), every row maps to the one-dimensional zero
/// vector.
pub fn project(rows: &Array2<f64>, cutoff: f64) -> Array2<f64> {
    let n = rows.nrows();
    if n == 0 {
        return Array2::zeros((0, 0));
    }

    let gram = rows.dot(&rows.t());
    if n == 1 {
        let sigma = gram[[0, 0]].max(0.0).sqrt();
        return Array2::from_elem((1, 1), if sigma > SINGULAR_EPSILON { sigma } else { 0.0 });
    }

    let (eigenvalues, eigenvectors) = match gram.eigh() {
        Ok(decomposition) => decomposition,
        Err(err) => {
            tracing::warn!("LSI eigen decomposition failed, using zero vectors: {}", err);
            return Array2::zeros((n, 1));
        }
    };

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        eigenvalues[b]
            .partial_cmp(&eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let keep = ((n as f64 * cutoff).round() as usize).clamp(1, n);
    let components: Vec<(usize, f64)> = order
        .into_iter()
        .take(keep)
        .map(|i| (i, eigenvalues[i].max(0.0).sqrt()))
        .filter(|&(_, sigma)| sigma > SINGULAR_EPSILON)
        .collect();

    tracing::trace!("LSI kept {} of {} components (cutoff {})", components.len(), n, cutoff);

    if components.is_empty() {
        return Array2::zeros((n, 1));
    }

    let columns: Vec<usize> = components.iter().map(|&(i, _)| i).collect();
    let mut projected = eigenvectors.select(Axis(1), &columns);
    for (mut column, &(_, sigma)) in projected.axis_iter_mut(Axis(1)).zip(&components) {
        column *= sigma;
    }
    projected
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, ArrayView1};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
        (&a - &b).mapv(|x| x * x).sum().sqrt()
    }

    #[test]
    fn test_full_rank_preserves_distances() {
        let rows = array![
            [1.0, 0.0, 0.0, 0.5],
            [0.0, 1.0, 0.0, 0.0],
            [0.3, 0.0, 1.0, 0.0],
        ];
        let projected = project(&rows, 1.0);
        assert_eq!(projected.dim(), (3, 3));
        for i in 0..3 {
            for j in 0..3 {
                let before = distance(rows.row(i), rows.row(j));
                let after = distance(projected.row(i), projected.row(j));
                assert!((before - after).abs() < 1e-9, "{} vs {}", before, after);
            }
        }
    }

    #[test]
    fn test_sparse_corpus_full_rank_preserves_distances() {
        let mut rng = StdRng::seed_from_u64(80);
        let rows = Array2::from_shape_fn((40, 120), |_| {
            if rng.gen::<f64>() < 0.05 {
                rng.gen::<f64>()
            } else {
                0.0
            }
        });

        let projected = project(&rows, 1.0);
        assert_eq!(projected.nrows(), 40);
        for i in 0..40 {
            for j in (i + 1)..40 {
                let before = distance(rows.row(i), rows.row(j));
                let after = distance(projected.row(i), projected.row(j));
                assert!((before - after).abs() < 1e-8, "{} vs {}", before, after);
            }
        }
    }

    #[test]
    fn test_keeps_largest_component() {
        // Two documents along one axis, one along another with less weight
        let rows = array![[3.0, 0.0], [3.0, 0.0], [0.0, 1.0]];
        let projected = project(&rows, 0.34);
        assert_eq!(projected.ncols(), 1);
        assert!((projected[[0, 0]].abs() - 3.0).abs() < 1e-9);
        assert!(projected[[2, 0]].abs() < 1e-9);
    }

    #[test]
    fn test_cutoff_reduces_dimension() {
        let rows = Array2::<f64>::eye(4);
        let projected = project(&rows, 0.5);
        assert_eq!(projected.dim(), (4, 2));
    }

    #[test]
    fn test_zero_rows_project_to_zero() {
        let rows = Array2::<f64>::zeros((2, 2));
        assert_eq!(project(&rows, 0.75), Array2::<f64>::zeros((2, 1)));

        let empty_vocabulary = Array2::<f64>::zeros((3, 0));
        assert_eq!(project(&empty_vocabulary, 0.75), Array2::<f64>::zeros((3, 1)));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(project(&Array2::zeros((0, 4)), 0.75).nrows(), 0);
    }
}
