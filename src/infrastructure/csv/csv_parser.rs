// ============================================================
// CSV PARSER
// ============================================================
// Reader and writer settings shared by the merge and the card reader

use csv::{Reader, ReaderBuilder, Terminator, Writer, WriterBuilder};
use std::io::{Read, Write};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// CSV reader/writer factory
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Record terminator used when writing (default: CRLF)
    terminator: Terminator,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            terminator: Terminator::CRLF,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the terminator written after each record
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Reader that yields every row, the header included, untrimmed.
    /// Rows may differ in length.
    pub fn reader<R: Read>(&self, input: R) -> Reader<R> {
        ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(input)
    }

    /// Writer that accepts rows of any length, quoting only when needed
    pub fn writer<W: Write>(&self, output: W) -> Writer<W> {
        WriterBuilder::new()
            .delimiter(self.delimiter)
            .terminator(self.terminator)
            .flexible(true)
            .from_writer(output)
    }
}

/// Remove a leading UTF-8 byte-order mark from a header cell
pub fn strip_bom(cell: &str) -> &str {
    cell.strip_prefix(BYTE_ORDER_MARK).unwrap_or(cell)
}
