//! Regressor contract and the linear regressor

use super::{ModelMetadata, ModelType};
use crate::forecast::features::{FeatureBatch, FEATURE_COUNT};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Trained model the prediction core calls into.
///
/// `predict` must return one value per batch row, in row order. It is
/// expected to be deterministic and free of side effects, so a single
/// instance can be shared between threads.
pub trait Regressor: Send + Sync {
    fn predict(&self, batch: &FeatureBatch) -> Result<Vec<f64>>;

    fn metadata(&self) -> &ModelMetadata;

    fn model_type(&self) -> ModelType {
        self.metadata().model_type
    }
}

/// Linear Regression over the feature columns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub metadata: ModelMetadata,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            metadata: ModelMetadata::new("solar_linear", ModelType::LinearRegression),
            coefficients,
            intercept,
        }
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, batch: &FeatureBatch) -> Result<Vec<f64>> {
        if self.coefficients.len() != FEATURE_COUNT {
            anyhow::bail!(
                "Feature count mismatch: expected {}, got {}",
                FEATURE_COUNT,
                self.coefficients.len()
            );
        }

        let predictions = batch
            .rows()
            .iter()
            .map(|row| {
                row.values()
                    .iter()
                    .zip(self.coefficients.iter())
                    .map(|(f, c)| f * c)
                    .sum::<f64>()
                    + self.intercept
            })
            .collect();

        Ok(predictions)
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlantId, WeatherSample};
    use crate::forecast::features::FeatureFrameBuilder;

    fn batch() -> FeatureBatch {
        let weather = WeatherSample::new(30.0, 40.0, 1.0, None);
        FeatureFrameBuilder::new()
            .build(&weather, PlantId::all())
            .unwrap()
    }

    #[test]
    fn test_linear_predict_per_row() {
        // Only irradiation and plant code contribute
        let model = LinearRegressor::new(vec![0.0, 0.0, 1000.0, 0.0, 0.0, 500.0], -10.0);
        let out = model.predict(&batch()).unwrap();
        assert_eq!(out, vec![990.0, 1490.0]);
    }

    #[test]
    fn test_linear_dimension_error() {
        let model = LinearRegressor::new(vec![1.0; 3], 0.0);
        let err = model.predict(&batch()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Feature count mismatch: expected 6, got 3"
        );
    }

    #[test]
    fn test_model_type() {
        let model = LinearRegressor::new(vec![0.0; FEATURE_COUNT], 0.0);
        assert_eq!(model.model_type(), ModelType::LinearRegression);
    }
}
