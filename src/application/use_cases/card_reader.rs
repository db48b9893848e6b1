// ============================================================
// CARD READER USE CASE
// ============================================================
// Turn a combined (or single topic) CSV file into flashcards

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::domain::card::{Card, DeckLoad};
use crate::domain::error::Result;
use crate::infrastructure::csv::{strip_bom, CsvParser};
use crate::interfaces::http::{add_log, SharedLogs};

/// Index column left behind by dataframe exports
pub const SENTINEL_COLUMN: &str = "Unnamed: 0";

pub struct CardReader {
    logs: SharedLogs,
    sentinel: String,
}

impl CardReader {
    pub fn new(logs: SharedLogs) -> Self {
        Self {
            logs,
            sentinel: SENTINEL_COLUMN.to_string(),
        }
    }

    /// Read every card from `path`. Never fails: missing files and read
    /// errors come back as `DeckLoad` variants.
    pub fn read_cards(&self, path: &Path) -> DeckLoad {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                add_log(
                    &self.logs,
                    "WARN",
                    "Cards",
                    &format!("Required file {} not found", path.display()),
                );
                return DeckLoad::MissingFile;
            }
            Err(err) => return self.read_failed(path, err.to_string()),
        };

        match self.read_from(file) {
            Ok(DeckLoad::EmptyFile) => {
                add_log(
                    &self.logs,
                    "INFO",
                    "Cards",
                    &format!("{} is empty, no cards", path.display()),
                );
                DeckLoad::EmptyFile
            }
            Ok(load) => load,
            Err(err) => self.read_failed(path, err.to_string()),
        }
    }

    /// Read cards from any CSV source; the first row is the header
    pub fn read_from<R: Read>(&self, input: R) -> Result<DeckLoad> {
        let mut reader = CsvParser::new().reader(input);
        let mut records = reader.records();

        let mut header: Vec<String> = match records.next() {
            None => return Ok(DeckLoad::EmptyFile),
            Some(record) => record?.iter().map(str::to_string).collect(),
        };
        if let Some(first) = header.first_mut() {
            *first = strip_bom(first).to_string();
        }

        let drop_index = header.iter().position(|name| *name == self.sentinel);
        if let Some(index) = drop_index {
            header.remove(index);
        }

        let mut cards = Vec::new();
        let mut skipped_rows = 0;

        // Blank lines never get here: the csv reader drops them, so they are
        // neither cards nor skipped rows.
        for record in records {
            let record = record?;
            let values: Vec<&str> = record
                .iter()
                .enumerate()
                .filter(|(index, _)| Some(*index) != drop_index)
                .map(|(_, value)| value)
                .collect();

            if values.len() != header.len() {
                skipped_rows += 1;
                add_log(
                    &self.logs,
                    "WARN",
                    "Cards",
                    &format!(
                        "Skipping malformed row due to length mismatch (expected {} fields, got {}): {:?}",
                        header.len(),
                        values.len(),
                        record.iter().collect::<Vec<_>>()
                    ),
                );
                continue;
            }

            cards.push(Card::from_pairs(
                header
                    .iter()
                    .cloned()
                    .zip(values.into_iter().map(str::to_string)),
            ));
        }

        Ok(DeckLoad::Cards {
            cards,
            skipped_rows,
        })
    }

    fn read_failed(&self, path: &Path, message: String) -> DeckLoad {
        add_log(
            &self.logs,
            "ERROR",
            "Cards",
            &format!("Failed to read {}: {}", path.display(), message),
        );
        DeckLoad::ReadError(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    fn reader() -> CardReader {
        CardReader::new(Arc::new(Mutex::new(Vec::new())))
    }

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flashcards-cards-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn pairs(card: &Card) -> Vec<(&str, &str)> {
        card.fields()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_sentinel_column_is_dropped() {
        let content = "Unnamed: 0,Topic,Word\n5,時間,じかん\n";
        let load = reader().read_from(content.as_bytes()).unwrap();

        let cards = load.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(pairs(&cards[0]), vec![("Topic", "時間"), ("Word", "じかん")]);
    }

    #[test]
    fn test_sentinel_in_middle_column() {
        let content = "Topic,Unnamed: 0,Word\nTime,7,いま\n";
        let load = reader().read_from(content.as_bytes()).unwrap();
        assert_eq!(pairs(&load.cards()[0]), vec![("Topic", "Time"), ("Word", "いま")]);
    }

    #[test]
    fn test_only_first_sentinel_is_dropped() {
        let content = "Unnamed: 0,Unnamed: 0,Word\n1,2,いま\n";
        let load = reader().read_from(content.as_bytes()).unwrap();
        assert_eq!(
            pairs(&load.cards()[0]),
            vec![("Unnamed: 0", "2"), ("Word", "いま")]
        );
    }

    #[test]
    fn test_sentinel_match_is_case_sensitive() {
        let content = "unnamed: 0,Word\n1,いま\n";
        let load = reader().read_from(content.as_bytes()).unwrap();
        assert_eq!(load.cards()[0].len(), 2);
        assert_eq!(load.cards()[0].get("unnamed: 0"), Some("1"));
    }

    #[test]
    fn test_bom_before_sentinel_is_ignored() {
        let content = "\u{feff}Unnamed: 0,Word\n1,いま\n";
        let load = reader().read_from(content.as_bytes()).unwrap();
        assert_eq!(pairs(&load.cards()[0]), vec![("Word", "いま")]);
    }

    #[test]
    fn test_malformed_row_is_skipped() {
        let content = "Topic,Word,Kanji\nTime,いま\nTime,じかん,時間\n";
        let logs = Arc::new(Mutex::new(Vec::new()));
        let load = CardReader::new(logs.clone())
            .read_from(content.as_bytes())
            .unwrap();

        assert_eq!(load.skipped_rows(), 1);
        assert_eq!(load.cards().len(), 1);
        assert_eq!(load.cards()[0].get("Kanji"), Some("時間"));

        let logs = logs.lock().unwrap();
        assert!(logs
            .iter()
            .any(|entry| entry.level == "WARN" && entry.message.contains("length mismatch")));
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let content = "Topic,Word\n\nTime,x\n\r\nTime,y\n";
        let logs = Arc::new(Mutex::new(Vec::new()));
        let load = CardReader::new(logs.clone())
            .read_from(content.as_bytes())
            .unwrap();

        assert_eq!(load.cards().len(), 2);
        assert_eq!(load.skipped_rows(), 0);
        assert!(logs.lock().unwrap().iter().all(|entry| entry.level != "WARN"));
    }

    #[test]
    fn test_rows_are_trimmed_by_position() {
        let content = "Topic,Word,Unnamed: 0\nTime,いま\n";
        let load = reader().read_from(content.as_bytes()).unwrap();
        assert_eq!(load.cards().len(), 1);

        let short = "Topic,Word,Unnamed: 0\nTime\n";
        let load = reader().read_from(short.as_bytes()).unwrap();
        assert_eq!(load.skipped_rows(), 1);
    }

    #[test]
    fn test_header_only_file_has_no_cards() {
        let load = reader().read_from("Topic,Word\r\n".as_bytes()).unwrap();
        assert_eq!(
            load,
            DeckLoad::Cards {
                cards: Vec::new(),
                skipped_rows: 0
            }
        );
    }

    #[test]
    fn test_empty_file() {
        let dir = scratch_dir();
        let path = dir.join("empty.csv");
        fs::write(&path, "").unwrap();

        let load = reader().read_cards(&path);
        assert_eq!(load, DeckLoad::EmptyFile);
        assert_eq!(load.user_error(), None);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_file() {
        let dir = scratch_dir();
        let load = reader().read_cards(&dir.join("n5-vocab.csv"));

        assert_eq!(load, DeckLoad::MissingFile);
        assert!(load.cards().is_empty());
        assert_eq!(load.user_error(), Some("Data file missing."));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let dir = scratch_dir();
        let path = dir.join("broken.csv");
        fs::write(&path, b"Topic,Word\n\xff\xfe,x\n").unwrap();

        let load = reader().read_cards(&path);
        assert!(matches!(load, DeckLoad::ReadError(_)));
        assert!(load.cards().is_empty());
        assert_eq!(load.user_error(), Some("An unexpected error occurred."));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_crlf_rows() {
        let content = "Topic,Word\r\nTime,いま\r\nTime,じかん\r\n";
        let load = reader().read_from(content.as_bytes()).unwrap();
        assert_eq!(load.cards().len(), 2);
        assert_eq!(load.cards()[1].get("Word"), Some("じかん"));
    }
}
