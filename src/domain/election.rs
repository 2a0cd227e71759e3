use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One name pulled out of a multi-person candidate cell.
///
/// `incumbent` is `Some(true)` when the cell carried the incumbency marker and
/// `None` otherwise. It is never `Some(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub incumbent: Option<bool>,
}

impl Person {
    pub fn new(name: impl Into<String>, incumbent: Option<bool>) -> Self {
        Self {
            name: name.into(),
            incumbent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub state: String,
    pub chamber: String,
    pub district: Option<u64>,
    pub name: String,
    pub incumbent: Option<bool>,
}

impl Candidate {
    pub fn key(&self) -> RaceKey {
        RaceKey::new(&self.state, &self.chamber)
    }
}

/// Electoral calendar and priority for one (state, chamber) race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub state: String,
    pub chamber: String,
    pub reason: String,
    pub filing_deadline: NaiveDate,
    pub primary_election: NaiveDate,
    pub weight: u64,
    pub detail_url: String,
}

impl StateRecord {
    pub fn key(&self) -> RaceKey {
        RaceKey::new(&self.state, &self.chamber)
    }
}

/// Join key shared by candidates and state records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RaceKey {
    pub state: String,
    pub chamber: String,
}

impl RaceKey {
    pub fn new(state: &str, chamber: &str) -> Self {
        Self {
            state: state.to_string(),
            chamber: chamber.to_string(),
        }
    }
}

impl std::fmt::Display for RaceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.state, self.chamber)
    }
}

pub type StateMap = BTreeMap<RaceKey, StateRecord>;

/// Both datasets as loaded by one fetch cycle. Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct ElectionSnapshot {
    pub states: StateMap,
    pub candidates: Vec<Candidate>,
}

impl ElectionSnapshot {
    pub fn new(states: StateMap, candidates: Vec<Candidate>) -> Self {
        Self { states, candidates }
    }
}
