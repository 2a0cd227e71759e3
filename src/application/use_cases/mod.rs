pub mod cell_parsers;
pub mod election_data;
pub mod race_table;
pub mod record_loaders;
