// ============================================================
// RACE TABLE
// ============================================================
// Join candidates to their state records and flatten for JSON

use serde_json::{json, Value};

use crate::application::use_cases::cell_parsers::deadline_instant;
use crate::domain::election::{Candidate, StateMap, StateRecord};
use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

/// Candidate fields followed by the joined state fields, minus the repeated key.
pub const CANDIDATE_HEAD: [&str; 10] = [
    "state",
    "chamber",
    "district",
    "name",
    "incumbent",
    "reason",
    "filing_deadline",
    "primary_election",
    "weight",
    "detail_url",
];

pub const STATE_HEAD: [&str; 7] = [
    "state",
    "chamber",
    "reason",
    "filing_deadline",
    "primary_election",
    "weight",
    "detail_url",
];

pub fn candidate_table(candidates: &[Candidate], states: &StateMap) -> Result<Table> {
    let mut table = Table::new(&CANDIDATE_HEAD);

    for candidate in candidates {
        let key = candidate.key();
        let state = states.get(&key).ok_or_else(|| {
            AppError::LookupError(format!(
                "No state record for {} (candidate {})",
                key, candidate.name
            ))
        })?;

        let mut row = vec![
            json!(candidate.state),
            json!(candidate.chamber),
            json!(candidate.district),
            json!(candidate.name),
            json!(candidate.incumbent),
        ];
        row.extend(calendar_cells(state)?);
        table.push_row(row);
    }

    Ok(table)
}

/// Every state record, ordered by (state, chamber).
pub fn state_table(states: &StateMap) -> Result<Table> {
    let mut table = Table::new(&STATE_HEAD);

    for state in states.values() {
        let mut row = vec![json!(state.state), json!(state.chamber)];
        row.extend(calendar_cells(state)?);
        table.push_row(row);
    }

    Ok(table)
}

fn calendar_cells(state: &StateRecord) -> Result<[Value; 5]> {
    Ok([
        json!(state.reason),
        json!(deadline_instant(state.filing_deadline)?.to_rfc3339()),
        json!(deadline_instant(state.primary_election)?.to_rfc3339()),
        json!(state.weight),
        json!(state.detail_url),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::record_loaders::{load_candidates_csv, load_states_csv};
    use serde_json::Value;

    const STATES_CSV: &str = "State,Chamber,Reason,Filing Deadline,Primary Election,Weight,Race Detail\nTexas,House of Representatives,Redistricting,\"December 9, 2019\",\"March 3, 2020\",\"191,333\",https://ballotpedia.org/Texas_House\nNorth Carolina,U.S. Senate,Senate Control,\"December 20, 2019\",\"March 3, 2020\",\"10,383,620\",https://ballotpedia.org/NC_Senate\n";

    const CANDIDATES_CSV: &str = "State,Chamber,District,Democratic Candidate(s)\nTexas,House of Representatives,27,\"Ron Reynolds (i)\nJoe Deshotel (i)\"\nTexas,House of Representatives,28,Elizabeth Markowitz\n";

    fn cell<'a>(table: &'a Table, row: usize, column: &str) -> &'a Value {
        let index = table.head.iter().position(|name| name == column).unwrap();
        &table.rows[row][index]
    }

    #[test]
    fn test_texas_house_scenario() {
        let states = load_states_csv(STATES_CSV).unwrap();
        let candidates = load_candidates_csv(CANDIDATES_CSV).unwrap();
        let table = candidate_table(&candidates, &states).unwrap();

        assert_eq!(table.head, CANDIDATE_HEAD);
        assert_eq!(table.rows.len(), 3);
        for row in 0..3 {
            assert_eq!(cell(&table, row, "weight"), &json!(191_333));
            assert_eq!(cell(&table, row, "reason"), &json!("Redistricting"));
        }
        assert_eq!(cell(&table, 0, "name"), &json!("Ron Reynolds"));
        assert_eq!(cell(&table, 0, "incumbent"), &json!(true));
        assert_eq!(cell(&table, 1, "name"), &json!("Joe Deshotel"));
        assert_eq!(cell(&table, 1, "incumbent"), &json!(true));
        assert_eq!(cell(&table, 2, "name"), &json!("Elizabeth Markowitz"));
        assert_eq!(cell(&table, 2, "incumbent"), &Value::Null);
        assert_eq!(cell(&table, 2, "district"), &json!(28));
    }

    #[test]
    fn test_candidate_row_layout() {
        let states = load_states_csv(STATES_CSV).unwrap();
        let candidates = load_candidates_csv(
            "State,Chamber,District,Democratic Candidate(s)\nNorth Carolina,U.S. Senate,,Cal Cunningham\n",
        )
        .unwrap();
        let table = candidate_table(&candidates, &states).unwrap();

        assert_eq!(
            table.rows[0],
            vec![
                json!("North Carolina"),
                json!("U.S. Senate"),
                Value::Null,
                json!("Cal Cunningham"),
                Value::Null,
                json!("Senate Control"),
                json!("2019-12-20T00:00:00-12:00"),
                json!("2020-03-03T00:00:00-12:00"),
                json!(10_383_620),
                json!("https://ballotpedia.org/NC_Senate"),
            ]
        );
    }

    #[test]
    fn test_missing_state_is_lookup_error() {
        let states = load_states_csv(STATES_CSV).unwrap();
        let candidates = load_candidates_csv(
            "State,Chamber,District,Democratic Candidate(s)\nTexas,U.S. Senate,,Cristina Tzintzún Ramirez\n",
        )
        .unwrap();

        let err = candidate_table(&candidates, &states).unwrap_err();
        assert_eq!(
            err,
            AppError::LookupError(
                "No state record for (Texas, U.S. Senate) (candidate Cristina Tzintzún Ramirez)"
                    .to_string()
            )
        );
    }

    #[test]
    fn test_no_candidates_gives_empty_table() {
        let states = load_states_csv(STATES_CSV).unwrap();
        let table = candidate_table(&[], &states).unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(table.head.len(), CANDIDATE_HEAD.len());
    }

    #[test]
    fn test_state_table_ordered_by_key() {
        let states = load_states_csv(STATES_CSV).unwrap();
        let table = state_table(&states).unwrap();

        assert_eq!(table.head, STATE_HEAD);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(cell(&table, 0, "state"), &json!("North Carolina"));
        assert_eq!(cell(&table, 1, "state"), &json!("Texas"));
        assert_eq!(
            cell(&table, 1, "filing_deadline"),
            &json!("2019-12-09T00:00:00-12:00")
        );
    }
}
