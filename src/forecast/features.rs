//! Feature frame construction for the yield regressor
//!
//! Turns a weather sample and a plant selection into the ordered rows the
//! model was trained on. Column order and plant codes are a contract with the
//! model artifact; see [`FeatureSchema`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::domain::{PlantId, WeatherSample};
use crate::error::{PredictionError, Result};

/// Column names in the order the model consumes them
pub const FEATURE_COLUMNS: [&str; 6] = [
    "AMBIENT_TEMPERATURE",
    "MODULE_TEMPERATURE",
    "IRRADIATION",
    "HOUR",
    "MINUTE",
    "PLANT_CODE",
];

/// Number of columns in a feature row
pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// One model input row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub ambient_temperature: f64,
    pub module_temperature: f64,
    pub irradiation: f64,
    pub hour: u32,
    pub minute: u32,
    pub plant: PlantId,
}

impl FeatureRow {
    pub fn plant_code(&self) -> u8 {
        self.plant.code()
    }

    /// Numeric values in [`FEATURE_COLUMNS`] order
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.ambient_temperature,
            self.module_temperature,
            self.irradiation,
            f64::from(self.hour),
            f64::from(self.minute),
            f64::from(self.plant_code()),
        ]
    }
}

/// Ordered rows for a single predict call.
///
/// Row `i` maps to prediction `i`; [`FeatureBatch::plants`] gives the plant
/// behind each index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureBatch {
    rows: Vec<FeatureRow>,
}

impl FeatureBatch {
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn plants(&self) -> Vec<PlantId> {
        self.rows.iter().map(|r| r.plant).collect()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }

    /// Row-major matrix of feature values
    pub fn to_matrix(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(|r| r.values().to_vec()).collect()
    }
}

/// Column layout and plant encoding a model was trained with.
///
/// Model artifacts carry one of these as a manifest so the layout can be
/// checked when the model is loaded rather than trusted by convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub columns: Vec<String>,
    pub plant_codes: BTreeMap<String, u8>,
}

impl FeatureSchema {
    /// The layout produced by [`FeatureFrameBuilder`]
    pub fn current() -> Self {
        Self {
            columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            plant_codes: PlantId::all()
                .into_iter()
                .map(|p| (p.key().to_string(), p.code()))
                .collect(),
        }
    }

    /// Check that `self` (a manifest) matches the `expected` layout exactly
    pub fn verify(&self, expected: &FeatureSchema) -> Result<()> {
        if self.columns.len() != expected.columns.len() {
            return Err(PredictionError::schema_mismatch(format!(
                "expected {} columns, manifest has {}",
                expected.columns.len(),
                self.columns.len()
            )));
        }

        if let Some((idx, (got, want))) = self
            .columns
            .iter()
            .zip(expected.columns.iter())
            .enumerate()
            .find(|(_, (got, want))| got != want)
        {
            return Err(PredictionError::schema_mismatch(format!(
                "column {} is '{}', expected '{}'",
                idx, got, want
            )));
        }

        if self.plant_codes != expected.plant_codes {
            return Err(PredictionError::schema_mismatch(format!(
                "plant encoding {:?} differs from {:?}",
                self.plant_codes, expected.plant_codes
            )));
        }

        Ok(())
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::current()
    }
}

/// Builds feature batches from weather samples
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureFrameBuilder;

impl FeatureFrameBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build one row per requested plant.
    ///
    /// Rows come out in ascending plant-code order whatever order the plants
    /// were requested in, and repeated plants collapse to a single row.
    pub fn build<I>(&self, weather: &WeatherSample, plants: I) -> Result<FeatureBatch>
    where
        I: IntoIterator<Item = PlantId>,
    {
        weather.validate()?;

        let plants: BTreeSet<PlantId> = plants.into_iter().collect();
        if plants.is_empty() {
            return Err(PredictionError::validation(
                "at least one plant must be requested",
            ));
        }

        let rows: Vec<FeatureRow> = plants
            .into_iter()
            .map(|plant| FeatureRow {
                ambient_temperature: weather.ambient_temperature,
                module_temperature: weather.module_temperature,
                irradiation: weather.irradiation,
                hour: weather.hour,
                minute: weather.minute,
                plant,
            })
            .collect();

        debug!(rows = rows.len(), hour = weather.hour, minute = weather.minute, "built feature batch");

        Ok(FeatureBatch { rows })
    }
}
