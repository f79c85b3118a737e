//! Persistence of the trained model as two flat artifacts.
//!
//! `movie_list.bin` holds the [`MovieTable`], `similarity.bin` the
//! [`SimilarityMatrix`]. Both are bincode-encoded; `f32` scores round-trip
//! bit for bit. Writes are not atomic: a crash mid-save can leave a broken
//! pair, which is fixed by rerunning training.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// File name of the serialized movie table
pub const MOVIES_ARTIFACT: &str = "movie_list.bin";

/// File name of the serialized similarity matrix
pub const SIMILARITY_ARTIFACT: &str = "similarity.bin";

fn artifact_error(path: &Path, err: impl std::fmt::Display) -> DataLoadError {
    DataLoadError::ArtifactError {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, value).map_err(|e| artifact_error(path, e))?;
    writer.flush()?;
    Ok(())
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    bincode::deserialize_from(BufReader::new(file)).map_err(|e| artifact_error(path, e))
}

impl TrainedModel {
    /// Write both artifacts into `dir`, creating it if needed
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        write_artifact(&dir.join(MOVIES_ARTIFACT), self.movies())?;
        write_artifact(&dir.join(SIMILARITY_ARTIFACT), self.similarity())?;
        info!(
            "Saved model with {} movies to {}",
            self.movies().len(),
            dir.display()
        );
        Ok(())
    }

    /// Load both artifacts from `dir` and check they line up
    pub fn load(dir: &Path) -> Result<Self> {
        let movies: MovieTable = read_artifact(&dir.join(MOVIES_ARTIFACT))?;
        let similarity: SimilarityMatrix = read_artifact(&dir.join(SIMILARITY_ARTIFACT))?;
        let model = TrainedModel::new(movies, similarity)?;
        info!(
            "Loaded model with {} movies from {}",
            model.movies().len(),
            dir.display()
        );
        Ok(model)
    }

    /// Whether both artifact files are present in `dir`
    pub fn artifacts_exist(dir: &Path) -> bool {
        dir.join(MOVIES_ARTIFACT).is_file() && dir.join(SIMILARITY_ARTIFACT).is_file()
    }
}
