use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::AppState;
use crate::ml::ModelMetadata;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
    checks: HealthChecks,
}

/// Individual health checks
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    model: ComponentHealth,
}

/// Health status of a component
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<ModelMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ComponentHealth {
    fn healthy(metadata: Option<ModelMetadata>) -> Self {
        Self {
            status: "healthy".to_string(),
            metadata,
            error: None,
        }
    }

    fn unhealthy(error: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            metadata: None,
            error: Some(error),
        }
    }
}

/// GET /health - Health check endpoint
///
/// Reports `degraded` with 503 while the model artifact is unavailable; the
/// process itself keeps serving.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let model = state.engine.model();
    let model_health = match model.unavailable_reason() {
        None => ComponentHealth::healthy(model.metadata().cloned()),
        Some(reason) => ComponentHealth::unhealthy(reason.to_string()),
    };

    let all_healthy = model.is_available();

    let response = HealthResponse {
        status: if all_healthy {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now(),
        checks: HealthChecks {
            model: model_health,
        },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(healthy = all_healthy, "Health check completed");

    (status_code, Json(response))
}

/// GET /health/live - Liveness probe
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_health_healthy() {
        let health = ComponentHealth::healthy(None);
        assert_eq!(health.status, "healthy");
        assert!(health.error.is_none());
    }

    #[test]
    fn test_component_health_unhealthy() {
        let health = ComponentHealth::unhealthy("artifact missing".to_string());
        assert_eq!(health.status, "unhealthy");
        assert_eq!(health.error, Some("artifact missing".to_string()));
    }
}
