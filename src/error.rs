use thiserror::Error;

/// Errors produced by the prediction core.
///
/// Every failure is returned to the caller; nothing in the core reports to a
/// user surface directly.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictionError {
    /// Model artifact missing, corrupt, or failing at prediction time.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Input outside its documented domain, rejected before the model runs.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Feature layout does not line up with what the model expects.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Non-numeric (NaN or infinite) value reached a decision rule.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PredictionError {
    pub fn model_unavailable(reason: impl Into<String>) -> Self {
        Self::ModelUnavailable(reason.into())
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    pub fn schema_mismatch(reason: impl Into<String>) -> Self {
        Self::SchemaMismatch(reason.into())
    }

    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Stable identifier used in API payloads and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelUnavailable(_) => "ModelUnavailable",
            Self::Validation(_) => "ValidationError",
            Self::SchemaMismatch(_) => "SchemaMismatch",
            Self::InvalidInput(_) => "InvalidInput",
        }
    }
}

pub type Result<T> = std::result::Result<T, PredictionError>;
