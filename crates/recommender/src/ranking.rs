//! Ranking of one movie's similarity row.

use data_loader::RowIndex;
use serde::Serialize;

/// A ranked neighbour of the query movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    pub index: RowIndex,
    pub score: f32,
}

/// Rank every row except `exclude` by descending score.
///
/// Equal scores keep ascending row order. The query row is removed by index,
/// so an exact duplicate of the query movie can still be recommended.
pub fn rank_candidates(row: &[f32], exclude: RowIndex) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = row
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != exclude)
        .map(|(index, &score)| Candidate { index, score })
        .collect();
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.index.cmp(&b.index))
    });
    candidates
}
