//! Single k-means run with k-means++ seeding
//!
//! # Algorithm
//!
//! 1. Seed: first centroid uniformly at random, each next one with
//!    probability proportional to its squared distance from the nearest
//!    centroid chosen so far.
//! 2. Assign every point to its nearest centroid (ties go to the lower index).
//! 3. Move each centroid to the mean of its points; a centroid that lost all
//!    its points stays where it was.
//! 4. Repeat 2-3 until no assignment changes or the iteration cap is reached.

use rand::rngs::StdRng;
use rand::Rng;

/// Result of one k-means run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Centroid index for each input point
    pub assignments: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    /// Sum of squared distances from each point to its centroid
    pub inertia: f64,
    pub iterations: usize,
    /// False when the iteration cap stopped the run
    pub converged: bool,
}

/// Run k-means once over `data` with `k` centroids
///
/// Callers guarantee `1 <= k <= data.len()` and equal-length rows.
pub fn run(data: &[&[f64]], k: usize, max_iterations: usize, rng: &mut StdRng) -> RunOutcome {
    let mut centroids = seed_centroids(data, k, rng);
    let mut assignments = vec![usize::MAX; data.len()];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iterations {
        iterations += 1;

        let mut changed = false;
        for (i, point) in data.iter().enumerate() {
            let (nearest, _) = nearest_centroid(point, &centroids);
            if assignments[i] != nearest {
                assignments[i] = nearest;
                changed = true;
            }
        }

        if !changed {
            converged = true;
            break;
        }

        centroids = recompute_centroids(data, &assignments, &centroids);
    }

    let inertia = data
        .iter()
        .zip(&assignments)
        .map(|(point, &c)| squared_distance(point, &centroids[c]))
        .sum();

    RunOutcome {
        assignments,
        centroids,
        inertia,
        iterations,
        converged,
    }
}

/// k-means++ seeding
fn seed_centroids(data: &[&[f64]], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let n = data.len();
    let mut centroids: Vec<Vec<f64>> = Vec::with_capacity(k);
    centroids.push(data[rng.gen_range(0..n)].to_vec());

    let mut closest: Vec<f64> = data
        .iter()
        .map(|p| squared_distance(p, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = closest.iter().sum();

        let next = if total > 0.0 {
            let target = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            let mut chosen = None;
            for (i, &d) in closest.iter().enumerate() {
                if d <= 0.0 {
                    continue;
                }
                cumulative += d;
                chosen = Some(i);
                if cumulative >= target {
                    break;
                }
            }
            chosen.unwrap_or_else(|| rng.gen_range(0..n))
        } else {
            // Every point sits on a centroid already
            rng.gen_range(0..n)
        };

        let centroid = data[next].to_vec();
        for (d, point) in closest.iter_mut().zip(data) {
            *d = d.min(squared_distance(point, &centroid));
        }
        centroids.push(centroid);
    }

    centroids
}

fn recompute_centroids(
    data: &[&[f64]],
    assignments: &[usize],
    previous: &[Vec<f64>],
) -> Vec<Vec<f64>> {
    let dimension = previous.first().map(Vec::len).unwrap_or(0);
    let mut sums = vec![vec![0.0; dimension]; previous.len()];
    let mut counts = vec![0usize; previous.len()];

    for (point, &c) in data.iter().zip(assignments) {
        counts[c] += 1;
        for (sum, x) in sums[c].iter_mut().zip(point.iter()) {
            *sum += x;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((sum, count), old)| {
            if count == 0 {
                old.clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect()
}

/// Index of and squared distance to the nearest centroid
pub fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(point, centroid);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn as_slices(rows: &[Vec<f64>]) -> Vec<&[f64]> {
        rows.iter().map(Vec::as_slice).collect()
    }

    #[test]
    fn test_two_obvious_groups() {
        let rows = vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![10.0, 10.0],
            vec![10.1, 10.0],
        ];
        let data = as_slices(&rows);
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = run(&data, 2, 100, &mut rng);

        assert!(outcome.converged);
        assert_eq!(outcome.assignments[0], outcome.assignments[1]);
        assert_eq!(outcome.assignments[2], outcome.assignments[3]);
        assert_ne!(outcome.assignments[0], outcome.assignments[2]);
        assert!((outcome.inertia - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_identical_points_do_not_fail() {
        let rows = vec![vec![0.0, 0.0]; 5];
        let data = as_slices(&rows);
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = run(&data, 3, 10, &mut rng);

        assert_eq!(outcome.centroids.len(), 3);
        assert!(outcome.assignments.iter().all(|&c| c == 0));
        assert_eq!(outcome.inertia, 0.0);
    }

    #[test]
    fn test_iteration_cap() {
        let rows = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0], vec![9.0]];
        let data = as_slices(&rows);
        let mut rng = StdRng::seed_from_u64(5);
        let outcome = run(&data, 2, 1, &mut rng);

        assert_eq!(outcome.iterations, 1);
        assert!(!outcome.converged);
        assert_eq!(outcome.assignments.len(), 5);
    }

    #[test]
    fn test_kmeans_plus_plus_picks_distinct_points() {
        let rows = vec![vec![0.0], vec![0.0], vec![5.0]];
        let data = as_slices(&rows);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let centroids = seed_centroids(&data, 2, &mut rng);
            assert_ne!(centroids[0], centroids[1]);
        }
    }

    #[test]
    fn test_nearest_ties_go_low() {
        let centroids = vec![vec![1.0], vec![-1.0]];
        assert_eq!(nearest_centroid(&[0.0], &centroids).0, 0);
    }
}
