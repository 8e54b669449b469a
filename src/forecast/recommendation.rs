//! Categorical recommendations derived from irradiation and farm output

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{PredictionError, Result};

/// Farm total above which a dual-plant result counts as highly viable (kW)
pub const FARM_HIGH_OUTPUT_KW: f64 = 8000.0;
/// Plant output above which a single-plant result counts as highly viable (kW)
pub const PLANT_HIGH_OUTPUT_KW: f64 = 10000.0;
/// Irradiation a comparative result must exceed to be highly viable
pub const HIGH_IRRADIATION: f64 = 0.8;
/// Irradiation below which generation should be backed by storage
pub const LOW_IRRADIATION: f64 = 0.2;

/// Rule set used to classify a result.
///
/// Thresholds differ between views and are not interchangeable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationPolicy {
    /// One plant on its own
    Single,
    /// Both plants added up as one farm
    Summed,
    /// Both plants side by side
    Comparative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Night,
    HighViability,
    StorageRequired,
    Standard,
}

impl Recommendation {
    pub fn headline(self) -> &'static str {
        match self {
            Recommendation::Night => "It's dark: solar panels do not generate at night.",
            Recommendation::HighViability => "Excellent generation conditions.",
            Recommendation::StorageRequired => {
                "Low irradiation: pair generation with battery storage."
            }
            Recommendation::Standard => "Normal generation conditions.",
        }
    }
}

/// Classify a result under `policy`.
///
/// Night detection uses exact equality with zero: it only triggers when the
/// irradiation input sits at its minimum.
pub fn classify(
    policy: RecommendationPolicy,
    irradiation: f64,
    total: f64,
) -> Result<Recommendation> {
    if irradiation.is_nan() || total.is_nan() {
        return Err(PredictionError::invalid_input(format!(
            "cannot classify irradiation={} total={}",
            irradiation, total
        )));
    }

    if irradiation == 0.0 {
        return Ok(Recommendation::Night);
    }

    let recommendation = match policy {
        RecommendationPolicy::Single => {
            if total > PLANT_HIGH_OUTPUT_KW {
                Recommendation::HighViability
            } else {
                Recommendation::Standard
            }
        }
        RecommendationPolicy::Summed | RecommendationPolicy::Comparative => {
            let high = match policy {
                RecommendationPolicy::Summed => total > FARM_HIGH_OUTPUT_KW,
                _ => irradiation > HIGH_IRRADIATION && total > FARM_HIGH_OUTPUT_KW,
            };
            if high {
                Recommendation::HighViability
            } else if irradiation < LOW_IRRADIATION {
                Recommendation::StorageRequired
            } else {
                Recommendation::Standard
            }
        }
    };

    Ok(recommendation)
}
