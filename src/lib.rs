//! Solar Yield Predictor
//!
//! Estimates photovoltaic plant output from weather inputs with a pre-trained
//! regressor. The core turns weather samples into model feature batches,
//! clamps and aggregates the model output per plant and per farm, and maps
//! the result to a categorical recommendation. [`api`] exposes it over HTTP.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod ml;
pub mod telemetry;

pub use error::{PredictionError, Result};
