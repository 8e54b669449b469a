//! SmartCore RandomForest Regressor
//!
//! Loads a random forest exported with bincode and runs it over a feature
//! batch in a single matrix call.

use super::{models::Regressor, ModelMetadata, ModelType};
use crate::forecast::features::FeatureBatch;
use anyhow::Result;

use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

pub struct ForestRegressor {
    metadata: ModelMetadata,
    model: Forest,
}

impl ForestRegressor {
    pub fn new(model: Forest, metadata: ModelMetadata) -> Self {
        Self { metadata, model }
    }

    /// Restore a forest from its bincode bytes
    pub fn from_bytes(bytes: &[u8], metadata: ModelMetadata) -> Result<Self> {
        if metadata.model_type != ModelType::RandomForest {
            anyhow::bail!(
                "Artifact metadata says {:?}, payload is a random forest",
                metadata.model_type
            );
        }
        let model: Forest = bincode::deserialize(bytes)
            .map_err(|e| anyhow::anyhow!("Failed to deserialize model: {}", e))?;
        Ok(Self::new(model, metadata))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self.model)
            .map_err(|e| anyhow::anyhow!("Failed to serialize model: {}", e))
    }
}

impl Regressor for ForestRegressor {
    fn predict(&self, batch: &FeatureBatch) -> Result<Vec<f64>> {
        if batch.is_empty() {
            anyhow::bail!("Cannot predict an empty batch");
        }

        let n_rows = batch.len();
        let n_features = batch.columns().len();
        let flat: Vec<f64> = batch.rows().iter().flat_map(|r| r.values()).collect();
        let x = DenseMatrix::new(n_rows, n_features, flat, false);

        self.model
            .predict(&x)
            .map_err(|e| anyhow::anyhow!("Prediction failed: {:?}", e))
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
