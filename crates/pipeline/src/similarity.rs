//! All-pairs cosine similarity over count vectors.
//!
//! ## Algorithm
//! sim(i, j) = dot(v_i, v_j) / (|v_i| * |v_j|)
//! - sim(i, i) = 1.0 for every row
//! - sim(i, j) = 0.0 when either row is the zero vector
//!
//! Rows are filled in parallel with Rayon. Dot products are exact integer
//! sums and the norm product is commutative, so sim(i, j) and sim(j, i) are
//! bit-identical.

use crate::vectorizer::{CountMatrix, SparseRow};
use data_loader::{Result, SimilarityMatrix};
use rayon::prelude::*;
use tracing::{info, instrument};

/// Exact dot product of two column-sorted sparse rows
pub fn sparse_dot(a: &SparseRow, b: &SparseRow) -> u64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0u64;
    while i < a.len() && j < b.len() {
        let (col_a, count_a) = a[i];
        let (col_b, count_b) = b[j];
        match col_a.cmp(&col_b) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += count_a as u64 * count_b as u64;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

fn norm(row: &SparseRow) -> f64 {
    let squares: u64 = row.iter().map(|&(_, c)| c as u64 * c as u64).sum();
    (squares as f64).sqrt()
}

/// Cosine similarity of two rows given their precomputed norms
fn cosine(a: &SparseRow, norm_a: f64, b: &SparseRow, norm_b: f64) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let sim = sparse_dot(a, b) as f64 / (norm_a * norm_b);
    sim.clamp(0.0, 1.0) as f32
}

/// Compute the full N x N similarity matrix for a count matrix
#[instrument(skip(counts), fields(rows = counts.len(), features = counts.dim()))]
pub fn cosine_similarity(counts: &CountMatrix) -> Result<SimilarityMatrix> {
    let rows = counts.rows();
    let n = rows.len();
    let norms: Vec<f64> = rows.par_iter().map(norm).collect();

    let mut scores = vec![0.0f32; n * n];
    if n > 0 {
        scores.par_chunks_mut(n).enumerate().for_each(|(i, out)| {
            for (j, cell) in out.iter_mut().enumerate() {
                *cell = if i == j {
                    1.0
                } else {
                    cosine(&rows[i], norms[i], &rows[j], norms[j])
                };
            }
        });
    }

    info!("Computed {}x{} similarity matrix", n, n);
    SimilarityMatrix::from_row_major(n, scores)
}
