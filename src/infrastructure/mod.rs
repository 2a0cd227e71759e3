pub mod bootstrap;
pub mod config;
pub mod csv;
pub mod csv_source;
