pub mod csv;
pub mod election;
pub mod error;
pub mod table;
