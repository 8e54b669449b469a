//! Machine Learning Module
//!
//! This module wraps the pre-trained yield regressor:
//! - the [`Regressor`] contract the prediction core relies on
//! - concrete regressors (linear, and a smartcore random forest behind `ml`)
//! - model artifacts with a bundled feature-schema manifest
//! - [`ModelHandle`], the explicitly constructed, read-only model instance
//!
//! Training is out of scope; artifacts are produced elsewhere.

use serde::{Deserialize, Serialize};

pub mod artifact;
pub mod inference;
pub mod models;

#[cfg(feature = "ml")]
pub mod smartcore;

pub use artifact::{ModelArtifact, ModelPayload};
pub use inference::ModelHandle;
pub use models::{LinearRegressor, Regressor};

/// ML Model Type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    LinearRegression,
    RandomForest,
}

/// ML Model Metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelMetadata {
    pub model_id: String,
    pub model_type: ModelType,
    pub version: String,
    pub trained_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub training_samples: usize,
    #[serde(default)]
    pub validation_metrics: Option<ValidationMetrics>,
}

impl ModelMetadata {
    pub fn new(model_id: impl Into<String>, model_type: ModelType) -> Self {
        Self {
            model_id: model_id.into(),
            model_type,
            version: "0.1.0".to_string(),
            trained_at: chrono::Utc::now(),
            training_samples: 0,
            validation_metrics: None,
        }
    }
}

/// Hold-out metrics recorded when the artifact was exported
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValidationMetrics {
    pub mae: f64,  // Mean Absolute Error
    pub rmse: f64, // Root Mean Square Error
    pub r2: f64,   // R-squared
}
