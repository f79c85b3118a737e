//! Tags for the rich input shape: overview plus genres, keywords, cast and
//! directors.
//!
//! ## Algorithm
//! 1. Decode each structured column into typed entries
//! 2. Keep every genre and keyword, the first `max_cast` cast members and
//!    every crew member whose job is "Director"
//! 3. Collapse whitespace inside each name so "Sam Worthington" becomes the
//!    single token "SamWorthington"
//! 4. Join overview words and all names with single spaces

use crate::traits::TagBuilder;
use data_loader::{FieldKind, MetadataEntry, SourceMovie, parse_structured_field};
use tracing::warn;

/// Number of cast members kept per movie
pub const DEFAULT_MAX_CAST: usize = 3;

/// Crew job that marks a director
pub const DIRECTOR_JOB: &str = "Director";

pub struct RichTags {
    max_cast: usize,
}

impl RichTags {
    pub fn new() -> Self {
        Self {
            max_cast: DEFAULT_MAX_CAST,
        }
    }

    /// Configure how many cast members are kept (default: 3)
    pub fn with_max_cast(mut self, max_cast: usize) -> Self {
        self.max_cast = max_cast;
        self
    }
}

impl Default for RichTags {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove all whitespace from a name
pub fn collapse_whitespace(name: &str) -> String {
    name.split_whitespace().collect()
}

/// Decode a structured column, recovering from malformed input with an
/// empty list. A missing column is simply empty.
pub fn entries_or_empty(raw: Option<&str>, kind: FieldKind, title: &str) -> Vec<MetadataEntry> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match parse_structured_field(raw, kind) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(title, error = %e, "Substituting empty {} list", kind.as_str());
            Vec::new()
        }
    }
}

/// Names of the first `limit` cast entries
pub fn top_cast(entries: &[MetadataEntry], limit: usize) -> Vec<String> {
    entries
        .iter()
        .filter(|e| matches!(e, MetadataEntry::Cast { .. }))
        .take(limit)
        .map(|e| collapse_whitespace(e.name()))
        .collect()
}

/// Names of every crew entry whose job is "Director", in input order
pub fn directors(entries: &[MetadataEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|e| match e {
            MetadataEntry::Crew { name, job } if job == DIRECTOR_JOB => {
                Some(collapse_whitespace(name))
            }
            _ => None,
        })
        .collect()
}

fn all_names(entries: &[MetadataEntry]) -> Vec<String> {
    entries.iter().map(|e| collapse_whitespace(e.name())).collect()
}

impl TagBuilder for RichTags {
    fn name(&self) -> &str {
        "RichTags"
    }

    fn build_tag(&self, title: &str, movie: &SourceMovie) -> String {
        let genres = entries_or_empty(movie.genres.as_deref(), FieldKind::Genres, title);
        let keywords = entries_or_empty(movie.keywords.as_deref(), FieldKind::Keywords, title);
        let cast = entries_or_empty(movie.cast.as_deref(), FieldKind::Cast, title);
        let crew = entries_or_empty(movie.crew.as_deref(), FieldKind::Crew, title);

        let mut tokens: Vec<String> = movie
            .overview
            .as_deref()
            .unwrap_or("")
            .split_whitespace()
            .map(str::to_string)
            .collect();
        tokens.extend(all_names(&genres));
        tokens.extend(all_names(&keywords));
        tokens.extend(top_cast(&cast, self.max_cast));
        tokens.extend(directors(&crew));
        tokens.join(" ")
    }
}
