//! Plant and farm level aggregation of raw model output

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::PlantId;
use crate::error::{PredictionError, Result};

/// Clamped per-plant output and the farm total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateOutcome {
    /// Non-negative power per plant
    pub per_plant: BTreeMap<PlantId, f64>,
    /// Sum of `per_plant`
    pub total: f64,
    /// Plants whose raw prediction was negative and got clamped to zero
    pub clamped: Vec<PlantId>,
}

impl AggregateOutcome {
    pub fn power(&self, plant: PlantId) -> Option<f64> {
        self.per_plant.get(&plant).copied()
    }
}

/// Difference between the two sites of the comparison view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiteComparison {
    /// `PlantB - PlantA`
    pub delta: f64,
    /// Site with the higher output, `None` on a tie
    pub leader: Option<PlantId>,
}

/// Negative power is physically impossible; report it as zero
pub fn clamp(prediction: f64) -> f64 {
    prediction.max(0.0)
}

/// Clamp each prediction, then sum per plant.
///
/// `predictions[i]` belongs to `plants[i]`. Clamping happens per row before
/// the sum so one plant's negative value never lowers another's contribution.
pub fn aggregate(predictions: &[f64], plants: &[PlantId]) -> Result<AggregateOutcome> {
    if predictions.len() != plants.len() {
        return Err(PredictionError::schema_mismatch(format!(
            "{} predictions for {} plants",
            predictions.len(),
            plants.len()
        )));
    }

    let mut per_plant = BTreeMap::new();
    let mut clamped = Vec::new();

    for (&raw, &plant) in predictions.iter().zip(plants) {
        if !raw.is_finite() {
            return Err(PredictionError::invalid_input(format!(
                "non-finite prediction {} for {}",
                raw, plant
            )));
        }
        if raw < 0.0 {
            clamped.push(plant);
        }
        if per_plant.insert(plant, clamp(raw)).is_some() {
            return Err(PredictionError::schema_mismatch(format!(
                "{} appears more than once in the batch",
                plant
            )));
        }
    }

    let total: f64 = per_plant.values().sum();

    Ok(AggregateOutcome {
        per_plant,
        total,
        clamped,
    })
}

/// Compare the two sites of an outcome; `None` unless both are present
pub fn compare(outcome: &AggregateOutcome) -> Option<SiteComparison> {
    let a = outcome.power(PlantId::PlantA)?;
    let b = outcome.power(PlantId::PlantB)?;

    let leader = if b > a {
        Some(PlantId::PlantB)
    } else if a > b {
        Some(PlantId::PlantA)
    } else {
        None
    };

    Some(SiteComparison { delta: b - a, leader })
}
