//! Core traits for tag building.
//!
//! A [`TagBuilder`] turns one source row into the text blob the vectorizer
//! consumes. The two supported input shapes are two implementations of the
//! same trait, so a deployment picks one when it builds its `Trainer`.

use data_loader::{MovieRecord, MovieTable, SourceMovie};
use tracing::info;

/// Strategy for deriving a movie's tag from its raw fields.
///
/// ## Design Note
/// - `Send + Sync` lets a trainer hold the builder behind a `Box<dyn _>`
/// - `build_tag` only sees rows whose title is present; dropping the rest
///   is done once in [`build_table`](TagBuilder::build_table)
pub trait TagBuilder: Send + Sync {
    /// Returns the name of this builder (for logging/debugging)
    fn name(&self) -> &str;

    /// Build the tag for a single movie.
    ///
    /// # Arguments
    /// * `title` - The movie's title as read, known not to be blank
    /// * `movie` - The full source row
    fn build_tag(&self, title: &str, movie: &SourceMovie) -> String;

    /// Build the movie table, dropping every row without a usable title.
    ///
    /// Row order is preserved, so the output never has more rows than the
    /// input.
    fn build_table(&self, rows: Vec<SourceMovie>) -> MovieTable {
        let input = rows.len();
        let mut table = MovieTable::new();
        for movie in &rows {
            // A blank title drops the row; a kept one is stored untrimmed
            let (Some(_), Some(title)) = (movie.usable_title(), movie.title.as_deref()) else {
                continue;
            };
            table.push(MovieRecord {
                id: movie.id,
                title: title.to_string(),
                tag: self.build_tag(title, movie),
            });
        }
        info!(
            "{}: built {} tags, dropped {} rows without a title",
            self.name(),
            table.len(),
            input - table.len()
        );
        table
    }
}
