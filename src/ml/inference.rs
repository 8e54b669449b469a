//! Model handle used by the prediction core
//!
//! The handle is built once at startup and passed to whoever needs it. A
//! handle whose artifact failed to load stays usable: every prediction on it
//! returns the load error (`ModelUnavailable`, or `SchemaMismatch` for an
//! artifact built against another feature layout) instead of taking the
//! process down.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{artifact::ModelArtifact, models::Regressor, ModelMetadata};
use crate::error::{PredictionError, Result};
use crate::forecast::features::FeatureBatch;

#[derive(Clone)]
enum ModelState {
    Ready(Arc<dyn Regressor>),
    Unavailable(PredictionError),
}

#[derive(Clone)]
pub struct ModelHandle {
    state: ModelState,
}

impl ModelHandle {
    pub fn ready(model: Arc<dyn Regressor>) -> Self {
        Self {
            state: ModelState::Ready(model),
        }
    }

    /// A handle in degraded mode
    pub fn unavailable(reason: PredictionError) -> Self {
        Self {
            state: ModelState::Unavailable(reason),
        }
    }

    /// Load an artifact, falling back to degraded mode on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match ModelArtifact::load(path).and_then(ModelArtifact::into_regressor) {
            Ok(model) => {
                let meta = model.metadata();
                info!(
                    path = %path.display(),
                    model_id = %meta.model_id,
                    model_type = ?meta.model_type,
                    version = %meta.version,
                    "model loaded"
                );
                Self::ready(model)
            }
            Err(e @ PredictionError::SchemaMismatch(_)) => {
                error!(path = %path.display(), error = %e, "model rejected, predictions disabled");
                Self::unavailable(e)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "model unavailable, predictions disabled");
                Self::unavailable(e)
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, ModelState::Ready(_))
    }

    pub fn metadata(&self) -> Option<&ModelMetadata> {
        match &self.state {
            ModelState::Ready(model) => Some(model.metadata()),
            ModelState::Unavailable(_) => None,
        }
    }

    /// Why the handle is degraded, if it is
    pub fn unavailable_reason(&self) -> Option<&PredictionError> {
        match &self.state {
            ModelState::Ready(_) => None,
            ModelState::Unavailable(reason) => Some(reason),
        }
    }

    /// Run the regressor over a batch.
    ///
    /// The result has exactly one value per row, in row order.
    pub fn predict(&self, batch: &FeatureBatch) -> Result<Vec<f64>> {
        let model = match &self.state {
            ModelState::Ready(model) => model,
            ModelState::Unavailable(reason) => return Err(reason.clone()),
        };

        let predictions = model
            .predict(batch)
            .map_err(|e| PredictionError::model_unavailable(format!("{:#}", e)))?;

        if predictions.len() != batch.len() {
            return Err(PredictionError::schema_mismatch(format!(
                "model returned {} values for {} rows",
                predictions.len(),
                batch.len()
            )));
        }

        Ok(predictions)
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            ModelState::Ready(model) => f
                .debug_struct("ModelHandle")
                .field("model_id", &model.metadata().model_id)
                .finish(),
            ModelState::Unavailable(reason) => f
                .debug_struct("ModelHandle")
                .field("unavailable", reason)
                .finish(),
        }
    }
}
