//! Tags for the minimal input shape: title and overview only.

use crate::traits::TagBuilder;
use data_loader::SourceMovie;

/// Builds `title + " " + overview`, with the overview left unsplit.
///
/// A missing overview counts as the empty string.
pub struct MinimalTags;

impl TagBuilder for MinimalTags {
    fn name(&self) -> &str {
        "MinimalTags"
    }

    fn build_tag(&self, title: &str, movie: &SourceMovie) -> String {
        format!("{} {}", title, movie.overview.as_deref().unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_tag() {
        let movie = SourceMovie::minimal("Alpha", "space war");
        assert_eq!(MinimalTags.build_tag("Alpha", &movie), "Alpha space war");
    }

    #[test]
    fn test_minimal_table_drops_missing_titles() {
        let rows = vec![
            SourceMovie::minimal("Alpha", "space war"),
            SourceMovie {
                title: None,
                overview: Some("orphan overview".to_string()),
                ..SourceMovie::default()
            },
            SourceMovie {
                id: Some(7),
                title: Some("Gamma".to_string()),
                overview: None,
                ..SourceMovie::default()
            },
        ];

        let table = MinimalTags.build_table(rows);

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).unwrap().title, "Alpha");
        assert_eq!(table.get(1).unwrap().id, Some(7));
        assert_eq!(table.get(1).unwrap().tag, "Gamma ");
    }

    #[test]
    fn test_minimal_table_keeps_title_as_read() {
        let rows = vec![
            SourceMovie::minimal(" Heat ", "heist crew"),
            SourceMovie::minimal("   ", "blank title"),
        ];

        let table = MinimalTags.build_table(rows);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0).unwrap().title, " Heat ");
        assert_eq!(table.get(0).unwrap().tag, " Heat  heist crew");
    }
}
