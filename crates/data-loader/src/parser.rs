//! Parsers for the movie source tables.
//!
//! Two input shapes are supported:
//! - minimal: one CSV with `title`, `overview` and an optional `id`
//! - rich: a movies CSV (`id`, `title`, `overview`, `genres`, `keywords`)
//!   plus a credits CSV (`movie_id`, `title`, `cast`, `crew`), joined on id
//!
//! Columns not listed above are ignored. Empty cells are missing values.
//! The structured columns hold JSON lists of objects; they are kept as raw
//! text here and decoded on demand by [`parse_structured_field`].

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct MinimalRow {
    #[serde(default, alias = "movie_id", deserialize_with = "csv::invalid_option")]
    id: Option<MovieId>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    overview: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RichMovieRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    id: Option<MovieId>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    genres: Option<String>,
    #[serde(default)]
    keywords: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreditsRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    movie_id: Option<MovieId>,
    #[serde(default)]
    cast: Option<String>,
    #[serde(default)]
    crew: Option<String>,
}

/// Open a CSV file with headers, mapping a missing file to `FileNotFound`
fn open_csv(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    Ok(csv::ReaderBuilder::new().flexible(true).from_reader(file))
}

/// Deserialize every record of a CSV file, attaching file/line context to
/// the first failure
fn read_rows<T>(path: &Path) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut reader = open_csv(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result.map_err(|e| DataLoadError::ParseError {
            file: file_name.clone(),
            line: e.position().map(|p| p.line() as usize).unwrap_or(0),
            reason: e.to_string(),
        })?;
        rows.push(row);
    }
    debug!("Read {} rows from {}", rows.len(), file_name);
    Ok(rows)
}

/// Treat blank cells as missing
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a minimal-shape movies table (title + overview)
pub fn parse_minimal_movies(path: &Path) -> Result<Vec<SourceMovie>> {
    let rows: Vec<MinimalRow> = read_rows(path)?;
    let movies: Vec<SourceMovie> = rows
        .into_iter()
        .map(|row| SourceMovie {
            id: row.id,
            title: non_blank(row.title),
            overview: row.overview,
            ..SourceMovie::default()
        })
        .collect();

    info!("Parsed {} movies from {}", movies.len(), path.display());
    Ok(movies)
}

/// Parse the rich-shape movies and credits tables and join them.
///
/// Credits are matched on `movies.id == credits.movie_id`; the first credits
/// row for an id wins. A movie with no id or no credits row keeps empty cast
/// and crew. Output order follows the movies table.
pub fn parse_rich_movies(movies_path: &Path, credits_path: &Path) -> Result<Vec<SourceMovie>> {
    let movie_rows: Vec<RichMovieRow> = read_rows(movies_path)?;
    let credit_rows: Vec<CreditsRow> = read_rows(credits_path)?;

    let mut credits: HashMap<MovieId, CreditsRow> = HashMap::with_capacity(credit_rows.len());
    for row in credit_rows {
        if let Some(id) = row.movie_id {
            credits.entry(id).or_insert(row);
        }
    }

    let mut unmatched = 0usize;
    let movies: Vec<SourceMovie> = movie_rows
        .into_iter()
        .map(|row| {
            let credit = row.id.and_then(|id| credits.remove(&id));
            if credit.is_none() {
                unmatched += 1;
            }
            let (cast, crew) = credit
                .map(|c| (non_blank(c.cast), non_blank(c.crew)))
                .unwrap_or((None, None));
            SourceMovie {
                id: row.id,
                title: non_blank(row.title),
                overview: row.overview,
                genres: non_blank(row.genres),
                keywords: non_blank(row.keywords),
                cast,
                crew,
            }
        })
        .collect();

    info!(
        "Parsed {} movies from {} ({} without credits)",
        movies.len(),
        movies_path.display(),
        unmatched
    );
    Ok(movies)
}

#[derive(Debug, Deserialize)]
struct NamedObject {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CrewObject {
    name: String,
    job: String,
}

/// Decode one structured column into typed entries.
///
/// The column must be a JSON array of objects, each with a string `name`
/// (and a string `job` for crew). Anything else is reported as
/// `MalformedStructuredField`; the caller decides whether to recover.
///
/// Example: `[{"id": 28, "name": "Action"}]` as `Genres` ->
/// `[MetadataEntry::Genre { name: "Action" }]`
pub fn parse_structured_field(raw: &str, kind: FieldKind) -> Result<Vec<MetadataEntry>> {
    let malformed = |reason: String| DataLoadError::MalformedStructuredField {
        field: kind.as_str().to_string(),
        reason,
    };

    match kind {
        FieldKind::Crew => {
            let objects: Vec<CrewObject> =
                serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
            Ok(objects
                .into_iter()
                .map(|o| MetadataEntry::Crew {
                    name: o.name,
                    job: o.job,
                })
                .collect())
        }
        FieldKind::Genres | FieldKind::Keywords | FieldKind::Cast => {
            let objects: Vec<NamedObject> =
                serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
            Ok(objects
                .into_iter()
                .map(|o| match kind {
                    FieldKind::Genres => MetadataEntry::Genre { name: o.name },
                    FieldKind::Keywords => MetadataEntry::Keyword { name: o.name },
                    _ => MetadataEntry::Cast { name: o.name },
                })
                .collect())
        }
    }
}
