use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::application::use_cases::race_table::{candidate_table, state_table};
use crate::application::use_cases::record_loaders::{load_candidates_csv, load_states_csv};
use crate::domain::election::ElectionSnapshot;
use crate::domain::error::Result;
use crate::domain::table::Table;
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::csv_source::CsvSource;

/// Fetches both sheets and serves joined tables from either a primed snapshot
/// or a fresh one per call.
pub struct ElectionDataUseCase {
    source: Arc<dyn CsvSource + Send + Sync>,
    states_url: String,
    candidates_url: String,
    primed: Option<Arc<ElectionSnapshot>>,
}

impl ElectionDataUseCase {
    pub fn new(
        source: Arc<dyn CsvSource + Send + Sync>,
        states_url: String,
        candidates_url: String,
    ) -> Self {
        Self {
            source,
            states_url,
            candidates_url,
            primed: None,
        }
    }

    /// Load once now; later calls reuse this snapshot and never fetch again.
    pub async fn prime(mut self) -> Result<Self> {
        let snapshot = self.fetch_snapshot().await?;
        self.primed = Some(Arc::new(snapshot));
        Ok(self)
    }

    pub fn is_primed(&self) -> bool {
        self.primed.is_some()
    }

    pub async fn fetch_snapshot(&self) -> Result<ElectionSnapshot> {
        let start = Instant::now();

        let (states_body, candidates_body) = tokio::try_join!(
            self.source.fetch(&self.states_url),
            self.source.fetch(&self.candidates_url)
        )?;

        let states = load_states_csv(CsvParser::decode(&states_body)?)?;
        let candidates = load_candidates_csv(CsvParser::decode(&candidates_body)?)?;

        info!(
            states = states.len(),
            candidates = candidates.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Loaded election snapshot"
        );

        Ok(ElectionSnapshot::new(states, candidates))
    }

    pub async fn snapshot(&self) -> Result<Arc<ElectionSnapshot>> {
        match &self.primed {
            Some(snapshot) => Ok(snapshot.clone()),
            None => Ok(Arc::new(self.fetch_snapshot().await?)),
        }
    }

    pub async fn candidate_table(&self) -> Result<Table> {
        let snapshot = self.snapshot().await?;
        candidate_table(&snapshot.candidates, &snapshot.states)
    }

    pub async fn state_table(&self) -> Result<Table> {
        let snapshot = self.snapshot().await?;
        state_table(&snapshot.states)
    }
}
