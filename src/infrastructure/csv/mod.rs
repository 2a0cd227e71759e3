// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// UTF-8 decoding and header-keyed row reading

mod csv_parser;

pub use csv_parser::CsvParser;
