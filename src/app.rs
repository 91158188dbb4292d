use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::application::FeedbackAnalysisUseCase;
use crate::domain::error::AppError;
use crate::infrastructure::config::{AppConfig, ConfigService};
use crate::infrastructure::llm_clients::RouterClient;
use crate::interfaces::http::{start_server, HttpState};

pub fn run() -> std::io::Result<()> {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = ConfigService::new().load().map_err(startup_error)?;

    actix_web::rt::System::new().block_on(serve(config))
}

async fn serve(config: AppConfig) -> std::io::Result<()> {
    if config.llm.api_key.is_none() {
        warn!(
            provider = ?config.llm.provider,
            "No API key configured; analysis requests will fail until one is set"
        );
    }

    let analysis = FeedbackAnalysisUseCase::new(Arc::new(RouterClient::new()), config.llm.clone())
        .with_sample_limit(config.analysis.sample_limit)
        .with_delimiter(config.analysis.delimiter_byte());

    let state = HttpState {
        analysis,
        max_upload_bytes: config.analysis.max_upload_bytes,
    };

    info!(
        host = %config.server.host,
        port = config.server.port,
        provider = ?config.llm.provider,
        model = %config.llm.model,
        "Starting feedback reporter"
    );

    start_server(state, &config.server.host, config.server.port)?.await
}

fn startup_error(err: AppError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
}
