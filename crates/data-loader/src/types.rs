//! Core domain types for the movie corpus.
//!
//! Rows flow through three shapes:
//! - [`SourceMovie`]: one joined row straight from the source tables, fields
//!   still raw and possibly missing
//! - [`MovieRecord`]: a kept row with its derived tag
//! - [`MovieTable`] + [`SimilarityMatrix`]: the trained model, addressed by
//!   row ordinal
//!
//! Rust concepts used here:
//! - Type aliases to keep database ids and row ordinals apart in signatures
//! - `Option<T>` for source columns that may be absent
//! - Private fields plus checked constructors, so a value that exists is valid

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier assigned to a movie by the external movie database
///
/// Not every source row has one; see [`SourceMovie::id`].
pub type MovieId = u64;

/// Ordinal position of a row in the [`MovieTable`]; also its row/column in
/// the [`SimilarityMatrix`]
pub type RowIndex = usize;

// =============================================================================
// Source rows
// =============================================================================

/// One movie as read from the source tables, before tag building.
///
/// The structured columns (`genres`, `keywords`, `cast`, `crew`) hold the raw
/// serialized list text; they are only present for the rich input shape.
///
/// Rust concept: every column is an `Option`, so "missing" and "empty" stay
/// distinguishable until tag building decides what to do with them. The
/// `Default` derive gives the all-`None` row that [`SourceMovie::minimal`]
/// fills in with struct update syntax.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceMovie {
    pub id: Option<MovieId>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub genres: Option<String>,
    pub keywords: Option<String>,
    pub cast: Option<String>,
    pub crew: Option<String>,
}

impl SourceMovie {
    /// Minimal-shape row: title and overview only
    pub fn minimal(title: impl Into<String>, overview: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            overview: Some(overview.into()),
            ..Self::default()
        }
    }

    /// The title, if present and not blank.
    ///
    /// Only decides whether the row is kept; the stored title is the raw
    /// `title` value, surrounding whitespace included.
    pub fn usable_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

// =============================================================================
// Structured metadata
// =============================================================================

/// Which structured column an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Genres,
    Keywords,
    Cast,
    Crew,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Genres => "genres",
            FieldKind::Keywords => "keywords",
            FieldKind::Cast => "cast",
            FieldKind::Crew => "crew",
        }
    }
}

/// A single typed entry parsed out of a structured column
///
/// Rust concept: an enum with data per variant. Only crew entries carry a
/// `job`, and the type makes it impossible to ask a genre for one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataEntry {
    Genre { name: String },
    Keyword { name: String },
    Cast { name: String },
    Crew { name: String, job: String },
}

impl MetadataEntry {
    /// The display name, whichever variant this is
    pub fn name(&self) -> &str {
        match self {
            MetadataEntry::Genre { name }
            | MetadataEntry::Keyword { name }
            | MetadataEntry::Cast { name }
            | MetadataEntry::Crew { name, .. } => name,
        }
    }
}

// =============================================================================
// Trained model
// =============================================================================

/// A movie kept for recommendation, with its derived tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// External database id, when the source table carried one
    pub id: Option<MovieId>,
    pub title: String,
    /// Normalized text blob the vectorizer consumes
    pub tag: String,
}

/// Ordered, index-addressable movie table.
///
/// Row `i` corresponds exactly to row/column `i` of the [`SimilarityMatrix`]
/// built from it.
///
/// Rust concept: `pub(crate)` keeps the vector visible inside this crate
/// (the index module scans it directly) while other crates only get the
/// read-only accessors below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieTable {
    pub(crate) records: Vec<MovieRecord>,
}

impl MovieTable {
    /// Creates a new, empty MovieTable
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        Self { records }
    }

    /// Append a record; its row index is the previous length
    pub fn push(&mut self, record: MovieRecord) -> RowIndex {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Get a record by row index
    pub fn get(&self, index: RowIndex) -> Option<&MovieRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Tags in row order, aligned with the table
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Square, symmetric matrix of cosine similarities in `[0, 1]`.
///
/// Stored row-major in a single buffer of `dim * dim` scores. Every
/// constructor checks that length, deserialization included, so [`row`] and
/// [`get`] can slice the buffer without further checks.
///
/// Rust concept: `#[serde(try_from = ...)]` makes serde decode the plain
/// `RawSimilarityMatrix` first and then run our `TryFrom`, so a forged or
/// truncated artifact is an error instead of a matrix that panics later.
///
/// [`row`]: SimilarityMatrix::row
/// [`get`]: SimilarityMatrix::get
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSimilarityMatrix")]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f32>,
}

/// Unchecked wire shape of a [`SimilarityMatrix`]
#[derive(Deserialize)]
struct RawSimilarityMatrix {
    dim: usize,
    scores: Vec<f32>,
}

impl TryFrom<RawSimilarityMatrix> for SimilarityMatrix {
    type Error = crate::DataLoadError;

    fn try_from(raw: RawSimilarityMatrix) -> crate::Result<Self> {
        Self::from_row_major(raw.dim, raw.scores)
    }
}

impl SimilarityMatrix {
    /// Wrap a row-major score buffer, checking that it is square
    ///
    /// ```
    /// use data_loader::SimilarityMatrix;
    ///
    /// let sim = SimilarityMatrix::from_row_major(2, vec![1.0, 0.5, 0.5, 1.0]).unwrap();
    /// assert_eq!(sim.row(1), Some(&[0.5, 1.0][..]));
    /// assert!(SimilarityMatrix::from_row_major(2, vec![1.0]).is_err());
    /// ```
    pub fn from_row_major(dim: usize, scores: Vec<f32>) -> crate::Result<Self> {
        if dim.checked_mul(dim) != Some(scores.len()) {
            return Err(crate::DataLoadError::ValidationError(format!(
                "expected {} scores for a {dim}x{dim} matrix, got {}",
                dim.saturating_mul(dim),
                scores.len()
            )));
        }
        Ok(Self { dim, scores })
    }

    /// Number of rows (and columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Score between two rows, `None` if either is out of range
    pub fn get(&self, row: RowIndex, col: RowIndex) -> Option<f32> {
        if row < self.dim && col < self.dim {
            Some(self.scores[row * self.dim + col])
        } else {
            None
        }
    }

    /// The similarity vector of one movie against every row
    pub fn row(&self, row: RowIndex) -> Option<&[f32]> {
        if row < self.dim {
            Some(&self.scores[row * self.dim..(row + 1) * self.dim])
        } else {
            None
        }
    }

    pub fn scores(&self) -> &[f32] {
        &self.scores
    }
}

/// The pair produced by training and loaded once at service startup.
///
/// Immutable after construction; share it behind an `Arc`.
///
/// Rust concept: no `&mut self` methods exist, so an `Arc<TrainedModel>` can
/// be read from any number of request handlers without a lock.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    movies: MovieTable,
    similarity: SimilarityMatrix,
}

impl TrainedModel {
    /// Pair a table with its matrix, enforcing row alignment
    pub fn new(movies: MovieTable, similarity: SimilarityMatrix) -> crate::Result<Self> {
        if movies.len() != similarity.dim() {
            return Err(crate::DataLoadError::ArtifactMismatch {
                table_rows: movies.len(),
                matrix_dim: similarity.dim(),
            });
        }
        Ok(Self { movies, similarity })
    }

    pub fn movies(&self) -> &MovieTable {
        &self.movies
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}
