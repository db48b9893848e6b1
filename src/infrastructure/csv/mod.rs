// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Reader/writer construction for topic and combined files

mod csv_parser;

pub use csv_parser::{strip_bom, CsvParser};
