// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Row types produced by the CSV reader
// No I/O, no async

mod csv_row;

pub use csv_row::CsvRow;
