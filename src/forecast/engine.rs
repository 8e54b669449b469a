use serde::Serialize;
use tracing::debug;

use super::aggregate::{self, AggregateOutcome, SiteComparison};
use super::features::FeatureFrameBuilder;
use super::recommendation::{classify, Recommendation, RecommendationPolicy};
use crate::domain::{PlantId, SiteLabel, WeatherSample};
use crate::error::{PredictionError, Result};
use crate::ml::ModelHandle;

/// Result of predicting one plant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantPrediction {
    pub plant: PlantId,
    /// Clamped power (kW)
    pub power: f64,
    /// Model output before clamping
    pub raw: f64,
    /// `raw` was negative and has been reported as zero
    pub clamped: bool,
    pub recommendation: Recommendation,
}

/// Both plants added up as one farm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmPrediction {
    pub outcome: AggregateOutcome,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteReport {
    pub plant: PlantId,
    pub label: SiteLabel,
    pub power: f64,
}

/// Both plants side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparativePrediction {
    pub outcome: AggregateOutcome,
    /// One entry per site, in plant-code order
    pub sites: Vec<SiteReport>,
    pub comparison: SiteComparison,
    pub recommendation: Recommendation,
}

/// Runs builder, regressor, aggregation and classification for each view
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    model: ModelHandle,
    builder: FeatureFrameBuilder,
}

impl PredictionEngine {
    pub fn new(model: ModelHandle) -> Self {
        Self {
            model,
            builder: FeatureFrameBuilder::new(),
        }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn predict_single(&self, weather: &WeatherSample, plant: PlantId) -> Result<PlantPrediction> {
        let (raw, outcome) = self.run(weather, &[plant])?;
        let recommendation = classify(RecommendationPolicy::Single, weather.irradiation, outcome.total)?;

        debug!(%plant, raw = raw[0], power = outcome.total, %recommendation, "single-plant prediction");

        Ok(PlantPrediction {
            plant,
            power: outcome.total,
            raw: raw[0],
            clamped: !outcome.clamped.is_empty(),
            recommendation,
        })
    }

    pub fn predict_summed(&self, weather: &WeatherSample) -> Result<FarmPrediction> {
        let (_, outcome) = self.run(weather, &PlantId::all())?;
        let recommendation = classify(RecommendationPolicy::Summed, weather.irradiation, outcome.total)?;

        debug!(total = outcome.total, %recommendation, "summed prediction");

        Ok(FarmPrediction {
            outcome,
            recommendation,
        })
    }

    pub fn predict_comparative(&self, weather: &WeatherSample) -> Result<ComparativePrediction> {
        let (_, outcome) = self.run(weather, &PlantId::all())?;
        let recommendation = classify(
            RecommendationPolicy::Comparative,
            weather.irradiation,
            outcome.total,
        )?;
        let comparison = aggregate::compare(&outcome).ok_or_else(|| {
            PredictionError::schema_mismatch("comparison needs both plants in the outcome")
        })?;

        let sites = outcome
            .per_plant
            .iter()
            .map(|(&plant, &power)| SiteReport {
                plant,
                label: SiteLabel::for_plant(plant),
                power,
            })
            .collect();

        debug!(total = outcome.total, delta = comparison.delta, %recommendation, "comparative prediction");

        Ok(ComparativePrediction {
            outcome,
            sites,
            comparison,
            recommendation,
        })
    }

    fn run(&self, weather: &WeatherSample, plants: &[PlantId]) -> Result<(Vec<f64>, AggregateOutcome)> {
        let batch = self.builder.build(weather, plants.iter().copied())?;
        let raw = self.model.predict(&batch)?;
        let outcome = aggregate::aggregate(&raw, &batch.plants())?;
        Ok((raw, outcome))
    }
}
