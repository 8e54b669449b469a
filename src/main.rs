use anyhow::Result;
use solar_yield_predictor::{api, config, forecast::PredictionEngine, ml::ModelHandle, telemetry};
use config::Config;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;
    telemetry::init_tracing(&cfg.telemetry);

    // Loaded once; a missing or rejected artifact leaves the service up in degraded mode
    let model = ModelHandle::load(&cfg.model.path);
    if !model.is_available() {
        warn!(path = %cfg.model.path.display(), "starting without a model, predictions will return 503");
    }

    let state = api::AppState::new(PredictionEngine::new(model));
    let app = api::router(state, &cfg);

    let addr = cfg.server.socket_addr()?;
    info!(%addr, "starting Solar Yield Predictor");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
