//! Title lookups over the [`MovieTable`].
//!
//! Matching is a case-insensitive substring test. When several rows match,
//! table order decides: the first row by ordinal position wins, never the
//! alphabetically smallest title.

use crate::error::{DataLoadError, Result};
use crate::types::*;

impl MovieTable {
    /// Index of the first row whose title contains `query`, ignoring case.
    ///
    /// An empty query matches nothing.
    pub fn find_first_match(&self, query: &str) -> Option<RowIndex> {
        if query.is_empty() {
            return None;
        }
        let needle = query.to_lowercase();
        self.records
            .iter()
            .position(|record| record.title.to_lowercase().contains(&needle))
    }

    /// Like [`find_first_match`](Self::find_first_match) but fails with
    /// `NotFound`
    pub fn resolve_title(&self, query: &str) -> Result<RowIndex> {
        self.find_first_match(query)
            .ok_or_else(|| DataLoadError::NotFound(query.to_string()))
    }

    /// Titles containing `query` (case-insensitive), in table order, at most
    /// `limit` of them
    pub fn search_titles(&self, query: &str, limit: usize) -> Vec<&str> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.title.to_lowercase().contains(&needle))
            .map(|record| record.title.as_str())
            .take(limit)
            .collect()
    }
}
