use std::sync::Arc;

use tracing::{error, info};

use crate::application::ElectionDataUseCase;
use crate::domain::error::Result;
use crate::infrastructure::config::{AppConfig, RefreshPolicy};
use crate::infrastructure::csv_source::{CsvSource, HttpCsvSource};

pub async fn setup(config: &AppConfig) -> Result<Arc<ElectionDataUseCase>> {
    let source: Arc<dyn CsvSource + Send + Sync> =
        Arc::new(HttpCsvSource::new(config.fetch_timeout())?);

    build_use_case(config, source).await.map(Arc::new)
}

pub async fn build_use_case(
    config: &AppConfig,
    source: Arc<dyn CsvSource + Send + Sync>,
) -> Result<ElectionDataUseCase> {
    let use_case = ElectionDataUseCase::new(
        source,
        config.states_csv_url.clone(),
        config.candidates_csv_url.clone(),
    );

    match config.refresh {
        RefreshPolicy::Startup => {
            let primed = use_case.prime().await.map_err(|err| {
                error!(
                    error = %err,
                    states_url = %config.states_csv_url,
                    candidates_url = %config.candidates_csv_url,
                    "Failed to load election data at startup"
                );
                err
            })?;
            info!("Serving the startup snapshot for the process lifetime");
            Ok(primed)
        }
        RefreshPolicy::PerRequest => {
            info!("Election data will be fetched on every request");
            Ok(use_case)
        }
    }
}
