//! Serialized model artifacts
//!
//! An artifact bundles the model payload with its metadata and the feature
//! schema it was trained against. `.json` files are read as JSON, anything
//! else as bincode.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::models::{LinearRegressor, Regressor};
use super::ModelMetadata;
use crate::error::{PredictionError, Result};
use crate::forecast::features::FeatureSchema;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ModelMetadata,
    pub schema: FeatureSchema,
    pub model: ModelPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelPayload {
    Linear { coefficients: Vec<f64>, intercept: f64 },
    /// bincode-encoded smartcore forest
    RandomForest { model_bytes: Vec<u8> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Json,
    Bincode,
}

impl Encoding {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Encoding::Json,
            _ => Encoding::Bincode,
        }
    }
}

impl ModelArtifact {
    /// Read an artifact and check its schema manifest.
    ///
    /// I/O and decoding failures are `ModelUnavailable`; a manifest that
    /// disagrees with the built-in feature layout is `SchemaMismatch`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            PredictionError::model_unavailable(format!("cannot read {}: {}", path.display(), e))
        })?;

        let artifact: ModelArtifact = match Encoding::for_path(path) {
            Encoding::Json => serde_json::from_slice(&bytes).map_err(|e| {
                PredictionError::model_unavailable(format!(
                    "corrupt artifact {}: {}",
                    path.display(),
                    e
                ))
            })?,
            Encoding::Bincode => bincode::deserialize(&bytes).map_err(|e| {
                PredictionError::model_unavailable(format!(
                    "corrupt artifact {}: {}",
                    path.display(),
                    e
                ))
            })?,
        };

        artifact.schema.verify(&FeatureSchema::current())?;
        debug!(path = %path.display(), model_id = %artifact.metadata.model_id, "artifact decoded");
        Ok(artifact)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let bytes = match Encoding::for_path(path) {
            Encoding::Json => serde_json::to_vec_pretty(self)?,
            Encoding::Bincode => bincode::serialize(self)?,
        };
        std::fs::write(path, bytes)?;
        info!(path = %path.display(), model_id = %self.metadata.model_id, "artifact written");
        Ok(())
    }

    pub fn from_linear(model: &LinearRegressor) -> Self {
        Self {
            metadata: model.metadata.clone(),
            schema: FeatureSchema::current(),
            model: ModelPayload::Linear {
                coefficients: model.coefficients.clone(),
                intercept: model.intercept,
            },
        }
    }

    /// Turn the payload into a ready-to-use regressor
    pub fn into_regressor(self) -> Result<Arc<dyn Regressor>> {
        match self.model {
            ModelPayload::Linear {
                coefficients,
                intercept,
            } => {
                if coefficients.len() != self.schema.columns.len() {
                    return Err(PredictionError::schema_mismatch(format!(
                        "{} coefficients for {} columns",
                        coefficients.len(),
                        self.schema.columns.len()
                    )));
                }
                Ok(Arc::new(
                    LinearRegressor::new(coefficients, intercept).with_metadata(self.metadata),
                ))
            }
            ModelPayload::RandomForest { model_bytes } => forest(&model_bytes, self.metadata),
        }
    }
}

#[cfg(feature = "ml")]
fn forest(bytes: &[u8], metadata: ModelMetadata) -> Result<Arc<dyn Regressor>> {
    super::smartcore::ForestRegressor::from_bytes(bytes, metadata)
        .map(|m| Arc::new(m) as Arc<dyn Regressor>)
        .map_err(|e| PredictionError::model_unavailable(format!("{:#}", e)))
}

#[cfg(not(feature = "ml"))]
fn forest(_bytes: &[u8], _metadata: ModelMetadata) -> Result<Arc<dyn Regressor>> {
    Err(PredictionError::model_unavailable(
        "random forest artifacts require the `ml` feature",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::ModelType;

    fn linear() -> LinearRegressor {
        LinearRegressor::new(vec![10.0, -5.0, 9000.0, 0.0, 0.0, 250.0], -100.0)
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        ModelArtifact::from_linear(&linear()).save(&path).unwrap();

        let artifact = ModelArtifact::load(&path).unwrap();
        assert_eq!(artifact.metadata.model_type, ModelType::LinearRegression);
        let regressor = artifact.into_regressor().unwrap();
        assert_eq!(regressor.metadata().model_id, "solar_linear");
    }

    #[test]
    fn test_bincode_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        ModelArtifact::from_linear(&linear()).save(&path).unwrap();

        assert!(ModelArtifact::load(&path).unwrap().into_regressor().is_ok());
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = ModelArtifact::load("does/not/exist.json").unwrap_err();
        assert!(matches!(err, PredictionError::ModelUnavailable(_)));
    }

    #[test]
    fn test_corrupt_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, PredictionError::ModelUnavailable(_)));
    }

    #[test]
    fn test_manifest_mismatch_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let mut artifact = ModelArtifact::from_linear(&linear());
        artifact.schema.columns.reverse();
        artifact.save(&path).unwrap();

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, PredictionError::SchemaMismatch(_)));
    }

    #[test]
    fn test_coefficient_count_checked() {
        let mut artifact = ModelArtifact::from_linear(&linear());
        artifact.model = ModelPayload::Linear {
            coefficients: vec![1.0; 4],
            intercept: 0.0,
        };
        assert!(matches!(
            artifact.into_regressor(),
            Err(PredictionError::SchemaMismatch(_))
        ));
    }
}
