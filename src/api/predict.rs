//! Prediction endpoints
//!
//! Thin mapping from request bodies to [`PredictionEngine`] calls. Bodies are
//! range-checked here for a friendly 400, and the engine checks them again.
//!
//! [`PredictionEngine`]: crate::forecast::PredictionEngine

use axum::{extract::State, Json};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::Validate;

use super::{error::ApiError, response::ApiResponse, AppState};
use crate::domain::{PlantId, WeatherSample};
use crate::forecast::{
    ComparativePrediction, FarmPrediction, FeatureSchema, PlantPrediction, Recommendation,
};

/// Weather fields shared by every prediction body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WeatherInput {
    #[validate(range(min = 20.0, max = 45.0))]
    pub ambient_temperature: f64,
    #[validate(range(min = 20.0, max = 75.0))]
    pub module_temperature: f64,
    #[validate(range(min = 0.0, max = 1.2))]
    pub irradiation: f64,
    /// Time of day (`HH:MM:SS`); noon when omitted
    #[serde(default)]
    pub time: Option<NaiveTime>,
}

impl WeatherInput {
    fn to_sample(&self) -> WeatherSample {
        WeatherSample::new(
            self.ambient_temperature,
            self.module_temperature,
            self.irradiation,
            self.time,
        )
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SinglePlantRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub weather: WeatherInput,
    pub plant: PlantId,
}

/// Prediction plus the text the presentation layer shows with it
#[derive(Debug, Serialize)]
pub struct PredictionResponse<T: Serialize> {
    pub prediction: T,
    pub headline: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl<T: Serialize> PredictionResponse<T> {
    fn new(prediction: T, recommendation: Recommendation) -> Self {
        Self {
            prediction,
            headline: recommendation.headline(),
            note: None,
        }
    }
}

/// POST /api/v1/predict/single
pub async fn predict_single(
    State(st): State<AppState>,
    Json(req): Json<SinglePlantRequest>,
) -> Result<Json<ApiResponse<PredictionResponse<PlantPrediction>>>, ApiError> {
    req.validate()?;
    let start = Instant::now();

    let prediction = st.engine.predict_single(&req.weather.to_sample(), req.plant)?;
    let mut body = PredictionResponse::new(prediction.clone(), prediction.recommendation);
    if prediction.clamped {
        body.note = Some(format!(
            "Model predicted {:.2} kW; negative output is reported as 0 kW",
            prediction.raw
        ));
    }

    Ok(Json(
        ApiResponse::success(body).with_duration(start.elapsed().as_millis() as u64),
    ))
}

/// POST /api/v1/predict/summed
pub async fn predict_summed(
    State(st): State<AppState>,
    Json(req): Json<WeatherInput>,
) -> Result<Json<ApiResponse<PredictionResponse<FarmPrediction>>>, ApiError> {
    req.validate()?;
    let start = Instant::now();

    let prediction = st.engine.predict_summed(&req.to_sample())?;
    let recommendation = prediction.recommendation;

    Ok(Json(
        ApiResponse::success(PredictionResponse::new(prediction, recommendation))
            .with_duration(start.elapsed().as_millis() as u64),
    ))
}

/// POST /api/v1/predict/comparative
pub async fn predict_comparative(
    State(st): State<AppState>,
    Json(req): Json<WeatherInput>,
) -> Result<Json<ApiResponse<PredictionResponse<ComparativePrediction>>>, ApiError> {
    req.validate()?;
    let start = Instant::now();

    let prediction = st.engine.predict_comparative(&req.to_sample())?;
    let recommendation = prediction.recommendation;

    Ok(Json(
        ApiResponse::success(PredictionResponse::new(prediction, recommendation))
            .with_duration(start.elapsed().as_millis() as u64),
    ))
}

/// GET /api/v1/schema - feature layout the service builds for the model
pub async fn get_schema() -> Json<ApiResponse<FeatureSchema>> {
    Json(ApiResponse::success(FeatureSchema::current()))
}
