//! Bag-of-words count vectorizer.
//!
//! Converts the corpus of tags into count vectors over a bounded vocabulary.
//!
//! ## Algorithm
//! 1. Lower-case each tag and split it into runs of alphanumeric characters
//!    (or `_`), keeping tokens of two or more characters that are not stop
//!    words
//! 2. Sum token counts across the corpus and keep the `max_features` most
//!    frequent tokens; equal counts are ordered lexicographically so the
//!    result is reproducible
//! 3. Assign vocabulary columns in lexicographic order
//! 4. Each movie's vector holds the raw count of every vocabulary token

use crate::stop_words::is_stop_word;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// One movie's vector, as `(column, count)` pairs sorted by column.
///
/// Columns with a zero count are omitted.
pub type SparseRow = Vec<(u32, u32)>;

/// Split text into vocabulary-eligible tokens
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().nth(1).is_some())
        .map(str::to_lowercase)
        .filter(|t| !is_stop_word(t))
}

fn count_tokens(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// The selected tokens and their column positions
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    terms: Vec<String>,
    columns: HashMap<String, u32>,
}

impl Vocabulary {
    fn from_sorted_terms(terms: Vec<String>) -> Self {
        let columns = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();
        Self { terms, columns }
    }

    /// Tokens in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn column(&self, term: &str) -> Option<u32> {
        self.columns.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn vectorize(&self, counts: &HashMap<String, u32>) -> SparseRow {
        let mut row: SparseRow = counts
            .iter()
            .filter_map(|(term, &count)| self.column(term).map(|col| (col, count)))
            .collect();
        row.sort_unstable_by_key(|&(col, _)| col);
        row
    }

    /// Vectorize documents against this vocabulary; unknown tokens are ignored
    pub fn transform<S: AsRef<str> + Sync>(&self, docs: &[S]) -> CountMatrix {
        let rows = docs
            .par_iter()
            .map(|doc| self.vectorize(&count_tokens(doc.as_ref())))
            .collect();
        CountMatrix {
            dim: self.len(),
            rows,
        }
    }
}

/// N x V count matrix, stored one sparse row per movie
#[derive(Debug, Clone, PartialEq)]
pub struct CountMatrix {
    dim: usize,
    rows: Vec<SparseRow>,
}

impl CountMatrix {
    /// Number of columns (vocabulary size)
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn rows(&self) -> &[SparseRow] {
        &self.rows
    }

    /// Number of movies
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Expand one row to a dense vector of length `dim`
    pub fn dense_row(&self, index: usize) -> Option<Vec<u32>> {
        let sparse = self.rows.get(index)?;
        let mut dense = vec![0; self.dim];
        for &(col, count) in sparse {
            dense[col as usize] = count;
        }
        Some(dense)
    }
}

/// Count vectorizer with English stop-word removal
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: usize,
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
        }
    }

    /// Configure the vocabulary cap (default: 5000)
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    fn select_terms(&self, totals: HashMap<String, u64>) -> Vocabulary {
        let mut ranked: Vec<(String, u64)> = totals.into_iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t).collect();
        terms.sort_unstable();
        Vocabulary::from_sorted_terms(terms)
    }

    /// Learn the vocabulary from a corpus
    pub fn fit<S: AsRef<str> + Sync>(&self, docs: &[S]) -> Vocabulary {
        self.fit_transform(docs).0
    }

    /// Learn the vocabulary and vectorize the same corpus in one pass
    #[instrument(skip(self, docs), fields(docs = docs.len(), max_features = self.max_features))]
    pub fn fit_transform<S: AsRef<str> + Sync>(&self, docs: &[S]) -> (Vocabulary, CountMatrix) {
        let per_doc: Vec<HashMap<String, u32>> =
            docs.par_iter().map(|doc| count_tokens(doc.as_ref())).collect();

        let mut totals: HashMap<String, u64> = HashMap::new();
        for counts in &per_doc {
            for (term, &count) in counts {
                *totals.entry(term.clone()).or_insert(0) += count as u64;
            }
        }
        debug!("Corpus has {} distinct tokens", totals.len());

        let vocabulary = self.select_terms(totals);
        let rows = per_doc
            .par_iter()
            .map(|counts| vocabulary.vectorize(counts))
            .collect();

        info!(
            "Vectorized {} documents over {} features",
            docs.len(),
            vocabulary.len()
        );
        let matrix = CountMatrix {
            dim: vocabulary.len(),
            rows,
        };
        (vocabulary, matrix)
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_rules() {
        let tokens: Vec<String> = tokenize("The X-Men fight in Space, a war_zone!").collect();
        // "The", "in", "a" are stop words; "X" is too short
        assert_eq!(tokens, vec!["men", "fight", "space", "war_zone"]);
    }

    #[test]
    fn test_vocabulary_sorted_and_capped() {
        let docs = ["space war space", "war romance", "drama space"];

        let vocab = CountVectorizer::new().with_max_features(2).fit(&docs);

        // space=3, war=2, then drama/romance tie at 1
        assert_eq!(vocab.terms(), &["space".to_string(), "war".to_string()]);
    }

    #[test]
    fn test_ties_break_lexicographically() {
        let docs = ["zebra apple mango"];
        let vocab = CountVectorizer::new().with_max_features(2).fit(&docs);
        assert_eq!(vocab.terms(), &["apple".to_string(), "mango".to_string()]);
    }

    #[test]
    fn test_counts_per_row() {
        let docs = ["space war space", "romance drama"];

        let (vocab, matrix) = CountVectorizer::new().fit_transform(&docs);

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.dim(), vocab.len());
        let space = vocab.column("space").unwrap() as usize;
        let war = vocab.column("war").unwrap() as usize;
        let row0 = matrix.dense_row(0).unwrap();
        assert_eq!(row0[space], 2);
        assert_eq!(row0[war], 1);
        assert_eq!(row0.iter().sum::<u32>(), 3);
    }

    #[test]
    fn test_reproducible() {
        let docs = ["beta alpha gamma", "gamma gamma delta", "epsilon beta"];
        let v = CountVectorizer::new().with_max_features(3);
        assert_eq!(v.fit_transform(&docs), v.fit_transform(&docs));
    }

    #[test]
    fn test_transform_ignores_unknown_tokens() {
        let vocab = CountVectorizer::new().fit(&["space war"]);
        let matrix = vocab.transform(&["space opera"]);
        assert_eq!(matrix.rows()[0], vec![(vocab.column("space").unwrap(), 1)]);
    }
}
