// ============================================================
// RECORD LOADERS
// ============================================================
// Header-keyed CSV rows to state and candidate records

use tracing::{debug, warn};

use crate::application::use_cases::cell_parsers::{
    parse_date, parse_district, parse_number, parse_persons,
};
use crate::domain::csv::CsvRow;
use crate::domain::election::{Candidate, StateMap, StateRecord};
use crate::domain::error::Result;
use crate::infrastructure::csv::CsvParser;

/// Column names fixed by the upstream sheets.
pub mod columns {
    pub const STATE: &str = "State";
    pub const CHAMBER: &str = "Chamber";
    pub const REASON: &str = "Reason";
    pub const FILING_DEADLINE: &str = "Filing Deadline";
    pub const PRIMARY_ELECTION: &str = "Primary Election";
    pub const WEIGHT: &str = "Weight";
    pub const RACE_DETAIL: &str = "Race Detail";
    pub const DISTRICT: &str = "District";
    pub const CANDIDATES: &str = "Democratic Candidate(s)";
}

pub const STATE_COLUMNS: [&str; 7] = [
    columns::STATE,
    columns::CHAMBER,
    columns::REASON,
    columns::FILING_DEADLINE,
    columns::PRIMARY_ELECTION,
    columns::WEIGHT,
    columns::RACE_DETAIL,
];

pub const CANDIDATE_COLUMNS: [&str; 4] = [
    columns::STATE,
    columns::CHAMBER,
    columns::DISTRICT,
    columns::CANDIDATES,
];

/// Build the state map. Any malformed row aborts the whole load.
///
/// A repeated `(State, Chamber)` pair replaces the earlier record.
pub fn load_states(rows: &[CsvRow]) -> Result<StateMap> {
    let mut states = StateMap::new();

    for row in rows {
        let record = StateRecord {
            state: row.get(columns::STATE).to_string(),
            chamber: row.get(columns::CHAMBER).to_string(),
            reason: row.get(columns::REASON).to_string(),
            filing_deadline: row.parse_with(columns::FILING_DEADLINE, parse_date)?,
            primary_election: row.parse_with(columns::PRIMARY_ELECTION, parse_date)?,
            weight: row.parse_with(columns::WEIGHT, parse_number)?,
            detail_url: row.get(columns::RACE_DETAIL).to_string(),
        };

        let key = record.key();
        if states.insert(key.clone(), record).is_some() {
            warn!(key = %key, line = row.line, "Duplicate state row replaces earlier record");
        }
    }

    debug!(count = states.len(), "Loaded state records");
    Ok(states)
}

/// Build the candidate list, one record per named person, in row then cell order.
pub fn load_candidates(rows: &[CsvRow]) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();

    for row in rows {
        let district = row.parse_with(columns::DISTRICT, parse_district)?;
        let state = row.get(columns::STATE);
        let chamber = row.get(columns::CHAMBER);

        candidates.extend(
            parse_persons(row.get(columns::CANDIDATES))
                .into_iter()
                .map(|person| Candidate {
                    state: state.to_string(),
                    chamber: chamber.to_string(),
                    district,
                    name: person.name,
                    incumbent: person.incumbent,
                }),
        );
    }

    debug!(count = candidates.len(), "Loaded candidate records");
    Ok(candidates)
}

pub fn load_states_csv(text: &str) -> Result<StateMap> {
    let rows = CsvParser::new().parse_content(text, &STATE_COLUMNS)?;
    load_states(&rows)
}

pub fn load_candidates_csv(text: &str) -> Result<Vec<Candidate>> {
    let rows = CsvParser::new().parse_content(text, &CANDIDATE_COLUMNS)?;
    load_candidates(&rows)
}
