use std::path::Path;
use std::sync::Arc;

use data_loader::TrainedModel;
use recommender::{Recommender, TmdbEnricher};
use tmdb_client::MetadataSource;
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};

/// Shared application state.
///
/// The model slot is filled once at startup and never written again; an
/// empty slot means the artifacts were missing and model routes answer 503.
#[derive(Clone)]
pub struct AppState {
    model: Option<Arc<TrainedModel>>,
    metadata: Arc<dyn MetadataSource>,
}

impl AppState {
    pub fn new(model: Option<Arc<TrainedModel>>, metadata: Arc<dyn MetadataSource>) -> Self {
        Self { model, metadata }
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> AppResult<&TrainedModel> {
        self.model.as_deref().ok_or(AppError::ModelNotLoaded)
    }

    pub fn metadata(&self) -> &dyn MetadataSource {
        self.metadata.as_ref()
    }

    /// Recommender over the loaded model, enriching through the metadata source
    pub fn recommender(&self) -> AppResult<Recommender<TmdbEnricher>> {
        let model = self.model.clone().ok_or(AppError::ModelNotLoaded)?;
        Ok(Recommender::new(model, TmdbEnricher::new(self.metadata.clone())))
    }
}

/// Load the artifact pair from `dir`, or `None` if it is missing or unreadable
pub fn load_model(dir: &Path) -> Option<Arc<TrainedModel>> {
    if !TrainedModel::artifacts_exist(dir) {
        warn!(
            "Model files not found in {}; run training first. Serving without a model",
            dir.display()
        );
        return None;
    }
    match TrainedModel::load(dir) {
        Ok(model) => {
            info!("Recommender model loaded: {} movies", model.movies().len());
            Some(Arc::new(model))
        }
        Err(e) => {
            error!(error = %e, "Failed to load model from {}", dir.display());
            None
        }
    }
}
