use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::domain::error::Result;
use crate::infrastructure::config::AppConfig;

pub async fn run() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let config = AppConfig::load().map_err(|err| {
        error!(error = %err, "Invalid configuration");
        err
    })?;

    let election = crate::infrastructure::bootstrap::setup(&config).await?;

    let server = crate::interfaces::http::start_server(election, &config)?;
    info!(
        host = %config.host,
        port = config.port,
        refresh = ?config.refresh,
        "HTTP server started"
    );

    server.await?;
    Ok(())
}
