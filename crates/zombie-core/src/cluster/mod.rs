//! Cluster module - Groups labeled vectors into topical clusters
//!
//! This module provides:
//! - The cluster-count heuristic used by the machine-learning strategy
//! - A k-means engine with k-means++ seeding and parallel restarts
//!
//! Restarts draw their seeds from the engine's RNG up front and run on the
//! rayon pool. The run with the lowest inertia wins; ties go to the earliest
//! run, so a seeded engine gives the same clustering on every machine.

pub mod kmeans;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_MAX_ITERATIONS, DEFAULT_PARAGRAPHS_PER_ARTICLE, DEFAULT_RUNS};

/// Number of clusters for `n` points: one per five paragraphs, at least one
pub fn desired_clusters(n: usize) -> usize {
    desired_clusters_with(n, DEFAULT_PARAGRAPHS_PER_ARTICLE)
}

pub fn desired_clusters_with(n: usize, per_cluster: usize) -> usize {
    (n / per_cluster.max(1)).max(1)
}

/// A labeled vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub label: String,
    pub vector: Vec<f64>,
}

impl Point {
    pub fn new(label: impl Into<String>, vector: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            vector,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Position of the cluster in its clustering, `0..clusters.len()`
    pub id: usize,
    /// Member points, in input order
    pub points: Vec<Point>,
    pub centroid: Vec<f64>,
}

impl Cluster {
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }
}

/// Outcome of clustering a point set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    /// Non-empty clusters; every input point is in exactly one
    pub clusters: Vec<Cluster>,
    pub inertia: f64,
    pub iterations: usize,
    pub converged: bool,
    /// Index of the restart that produced this clustering
    pub run: usize,
}

impl Clustering {
    fn empty() -> Self {
        Self {
            clusters: Vec::new(),
            inertia: 0.0,
            iterations: 0,
            converged: true,
            run: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterParams {
    /// Independent restarts per clustering
    pub runs: usize,
    /// Iteration cap per restart
    pub max_iterations: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            runs: DEFAULT_RUNS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// k-means with restarts
pub struct ClusterEngine {
    params: ClusterParams,
    rng: StdRng,
}

impl ClusterEngine {
    pub fn new(params: ClusterParams, rng: StdRng) -> Self {
        Self { params, rng }
    }

    pub fn params(&self) -> ClusterParams {
        self.params
    }

    /// Partition `points` into at most `k` non-empty clusters
    ///
    /// `k` is clamped to `1..=points.len()`. Clusters that end up empty are
    /// dropped and the remaining ones renumbered from zero.
    pub fn cluster(&mut self, k: usize, points: Vec<Point>) -> Clustering {
        if points.is_empty() {
            return Clustering::empty();
        }

        let k = k.clamp(1, points.len());
        let runs = self.params.runs.max(1);
        let max_iterations = self.params.max_iterations.max(1);
        let seeds: Vec<u64> = (0..runs).map(|_| self.rng.gen()).collect();

        let data: Vec<&[f64]> = points.iter().map(|p| p.vector.as_slice()).collect();

        let outcomes: Vec<kmeans::RunOutcome> = seeds
            .par_iter()
            .enumerate()
            .map(|(run, &seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                let outcome = kmeans::run(&data, k, max_iterations, &mut rng);
                tracing::debug!(
                    "k-means run {}: inertia {:.6}, {} iterations{}",
                    run,
                    outcome.inertia,
                    outcome.iterations,
                    if outcome.converged { "" } else { " (iteration cap)" }
                );
                outcome
            })
            .collect();

        // Strictly lower inertia replaces the best, so ties keep the earliest run
        let mut best_run = 0;
        for (run, outcome) in outcomes.iter().enumerate().skip(1) {
            if outcome.inertia < outcomes[best_run].inertia {
                best_run = run;
            }
        }
        let Some(best) = outcomes.into_iter().nth(best_run) else {
            return Clustering::empty();
        };

        tracing::debug!(
            "Selected k-means run {} of {} (k = {}, inertia {:.6})",
            best_run,
            runs,
            k,
            best.inertia
        );

        let mut members: Vec<Vec<Point>> = vec![Vec::new(); k];
        for (point, &c) in points.into_iter().zip(&best.assignments) {
            members[c].push(point);
        }

        let clusters: Vec<Cluster> = members
            .into_iter()
            .zip(best.centroids)
            .filter(|(points, _)| !points.is_empty())
            .enumerate()
            .map(|(id, (points, centroid))| Cluster {
                id,
                points,
                centroid,
            })
            .collect();

        Clustering {
            clusters,
            inertia: best.inertia,
            iterations: best.iterations,
            converged: best.converged,
            run: best_run,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every input point lands in exactly one cluster
        #[test]
        fn prop_partition_complete(
            xs in prop::collection::vec(-100.0f64..100.0, 1..40),
            k in 1usize..8,
            seed in any::<u64>(),
        ) {
            let points: Vec<Point> = xs
                .iter()
                .enumerate()
                .map(|(i, &x)| Point::new(format!("p{}", i), vec![x]))
                .collect();
            let params = ClusterParams { runs: 3, max_iterations: 50 };
            let clustering =
                ClusterEngine::new(params, StdRng::seed_from_u64(seed)).cluster(k, points);

            let mut labels: Vec<String> = clustering
                .clusters
                .iter()
                .flat_map(|c| c.labels())
                .collect();
            labels.sort();
            let mut expected: Vec<String> = (0..xs.len()).map(|i| format!("p{}", i)).collect();
            expected.sort();

            prop_assert_eq!(labels, expected);
            prop_assert!(clustering.len() <= k.min(xs.len()));
            prop_assert!(clustering.clusters.iter().all(|c| !c.points.is_empty()));
        }

        /// Property: cluster count is at least one and grows with every five points
        #[test]
        fn prop_desired_clusters(n in 0usize..10_000) {
            let k = desired_clusters(n);
            prop_assert!(k >= 1);
            prop_assert_eq!(k, std::cmp::max(1, n / 5));
        }
    }
}
