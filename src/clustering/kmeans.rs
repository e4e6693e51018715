//! Standardization and seeded Lloyd's k-means.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::utils::{mean, population_std_dev};

// ============================================================================
// Standardizer
// ============================================================================

/// Per-column zero-mean, unit-variance scaling.
///
/// Constant columns get a scale of 1 so they transform to all zeros instead
/// of dividing by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl Standardizer {
    /// Fit column statistics. All rows must have `dimension` columns.
    #[must_use]
    pub fn fit(rows: &[Vec<f64>], dimension: usize) -> Self {
        let mut means = Vec::with_capacity(dimension);
        let mut scales = Vec::with_capacity(dimension);

        for column in 0..dimension {
            let values: Vec<f64> = rows.iter().map(|r| r[column]).collect();
            let std = population_std_dev(&values);
            means.push(mean(&values));
            scales.push(if std > 0.0 { std } else { 1.0 });
        }

        Self { means, scales }
    }

    #[must_use]
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }

    /// Map a standardized row back to original units.
    #[must_use]
    pub fn inverse_transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(v, (m, s))| v * s + m)
            .collect()
    }
}

// ============================================================================
// K-means
// ============================================================================

/// Result of a k-means fit.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    /// Cluster label per input row
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    pub iterations: usize,
    pub converged: bool,
    /// Sum of squared distances to assigned centroids
    pub inertia: f64,
}

/// Seeded k-means with k-means++ initialization.
///
/// Given the same rows and seed the fit is identical across runs.
#[derive(Debug, Clone, Copy)]
pub struct KMeans {
    k: usize,
    seed: u64,
    max_iterations: usize,
    tolerance: f64,
}

impl KMeans {
    #[must_use]
    pub const fn new(k: usize, seed: u64) -> Self {
        Self {
            k,
            seed,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }

    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Fit over finite rows of equal width.
    ///
    /// `k` is reduced to the number of rows; an empty input yields an empty fit.
    #[must_use]
    pub fn fit(&self, rows: &[Vec<f64>]) -> KMeansFit {
        let k = self.k.min(rows.len());
        if k == 0 {
            return KMeansFit {
                labels: Vec::new(),
                centroids: Vec::new(),
                iterations: 0,
                converged: true,
                inertia: 0.0,
            };
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = init_plus_plus(rows, k, &mut rng);
        let mut labels = assign(rows, &centroids);
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations.max(1) {
            iterations += 1;

            let updated = update_centroids(rows, &labels, &centroids);
            let shift = max_shift(&centroids, &updated);
            centroids = updated;

            let relabeled = assign(rows, &centroids);
            let changed = relabeled.iter().zip(&labels).filter(|(a, b)| a != b).count();
            labels = relabeled;

            tracing::debug!(
                "k-means iteration {}: shift={:.6}, reassigned={}",
                iterations,
                shift,
                changed
            );

            if changed == 0 || shift <= self.tolerance {
                converged = true;
                break;
            }
        }

        let inertia = rows
            .iter()
            .zip(&labels)
            .map(|(row, &label)| squared_distance(row, &centroids[label]))
            .sum();

        KMeansFit {
            labels,
            centroids,
            iterations,
            converged,
            inertia,
        }
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn nearest_centroid(row: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(row, centroid);
        if dist < best_dist {
            best_dist = dist;
            best = j;
        }
    }
    best
}

fn assign(rows: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    rows.par_iter()
        .map(|row| nearest_centroid(row, centroids))
        .collect()
}

/// Recompute centroids as member means. Empty clusters keep their previous centroid.
fn update_centroids(rows: &[Vec<f64>], labels: &[usize], previous: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let dim = previous.first().map_or(0, Vec::len);
    let mut sums = vec![vec![0.0; dim]; previous.len()];
    let mut counts = vec![0usize; previous.len()];

    for (row, &label) in rows.iter().zip(labels) {
        counts[label] += 1;
        for (sum, value) in sums[label].iter_mut().zip(row) {
            *sum += value;
        }
    }

    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((sum, count), prev)| {
            if count == 0 {
                prev.clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect()
}

fn max_shift(before: &[Vec<f64>], after: &[Vec<f64>]) -> f64 {
    before
        .iter()
        .zip(after)
        .map(|(a, b)| squared_distance(a, b).sqrt())
        .fold(0.0, f64::max)
}

/// k-means++ seeding: each new centroid is drawn with probability
/// proportional to squared distance from the nearest chosen one.
fn init_plus_plus(rows: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut chosen = vec![rng.gen_range(0..rows.len())];

    while chosen.len() < k {
        let weights: Vec<f64> = rows
            .iter()
            .map(|row| {
                chosen
                    .iter()
                    .map(|&c| squared_distance(row, &rows[c]))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();

        let next = if total > 0.0 {
            let target = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            let mut pick = weights
                .iter()
                .rposition(|w| *w > 0.0)
                .unwrap_or(rows.len() - 1);
            for (i, w) in weights.iter().enumerate() {
                cumulative += w;
                if cumulative > target && *w > 0.0 {
                    pick = i;
                    break;
                }
            }
            pick
        } else {
            // Every remaining row duplicates a chosen one
            (0..rows.len())
                .find(|i| !chosen.contains(i))
                .unwrap_or(0)
        };
        chosen.push(next);
    }

    chosen.into_iter().map(|i| rows[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, -0.1],
            vec![-0.1, 0.1],
            vec![10.0, 10.0],
            vec![10.1, 9.9],
            vec![9.9, 10.1],
        ]
    }

    #[test]
    fn test_standardizer_round_trip() {
        let rows = blobs();
        let s = Standardizer::fit(&rows, 2);
        for row in &rows {
            let back = s.inverse_transform(&s.transform(row));
            for (a, b) in back.iter().zip(row) {
                assert!((a - b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_constant_column_scales_to_zero() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 3.0]];
        let s = Standardizer::fit(&rows, 2);
        assert_eq!(s.transform(&rows[0])[0], 0.0);
        assert_eq!(s.transform(&rows[1]), vec![0.0, 1.0]);
    }

    #[test]
    fn test_separates_two_blobs() {
        let fit = KMeans::new(2, 42).fit(&blobs());
        assert!(fit.converged);
        assert_eq!(fit.centroids.len(), 2);
        assert_eq!(fit.labels[0], fit.labels[1]);
        assert_eq!(fit.labels[0], fit.labels[2]);
        assert_eq!(fit.labels[3], fit.labels[4]);
        assert_ne!(fit.labels[0], fit.labels[3]);
    }

    #[test]
    fn test_same_seed_same_fit() {
        let a = KMeans::new(3, 7).fit(&blobs());
        let b = KMeans::new(3, 7).fit(&blobs());
        assert_eq!(a, b);
    }

    #[test]
    fn test_k_reduced_to_rows() {
        let fit = KMeans::new(10, 1).fit(&blobs()[..2]);
        assert_eq!(fit.centroids.len(), 2);
        assert_ne!(fit.labels[0], fit.labels[1]);
    }

    #[test]
    fn test_duplicate_rows() {
        let rows = vec![vec![1.0, 1.0]; 4];
        let fit = KMeans::new(3, 42).fit(&rows);
        assert_eq!(fit.centroids.len(), 3);
        assert_eq!(fit.inertia, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let fit = KMeans::new(3, 42).fit(&[]);
        assert!(fit.labels.is_empty());
        assert!(fit.centroids.is_empty());
    }
}
