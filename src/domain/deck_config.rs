// ============================================================
// DECK CONFIGURATION
// ============================================================
// Where topic files live, how they are named, and how the page is served

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_HEADER: [&str; 6] = ["Topic", "Audio", "Word", "Kanji", "Meaning", "Notes"];

/// Naming pattern and output of the topic merge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Text before the topic number (default: "n5-vocab - Topic")
    pub file_prefix: String,

    /// Text after the topic number (default: ".csv")
    pub file_suffix: String,

    /// First topic number, inclusive (default: 1)
    pub range_start: u32,

    /// Last topic number, inclusive (default: 24)
    pub range_end: u32,

    /// Combined file name (default: "n5-vocab.csv")
    pub output_file: String,

    /// Header written at the top of the combined file
    pub header: Vec<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            file_prefix: "n5-vocab - Topic".to_string(),
            file_suffix: ".csv".to_string(),
            range_start: 1,
            range_end: 24,
            output_file: "n5-vocab.csv".to_string(),
            header: DEFAULT_HEADER.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl MergeConfig {
    /// File name of topic `number`, e.g. "n5-vocab - Topic3.csv"
    pub fn topic_file_name(&self, number: u32) -> String {
        format!("{}{}{}", self.file_prefix, number, self.file_suffix)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.file_prefix.is_empty() {
            return Err("file_prefix must not be empty".to_string());
        }
        if self.range_start > self.range_end {
            return Err(format!(
                "range_start ({}) must be <= range_end ({})",
                self.range_start, self.range_end
            ));
        }
        if self.output_file.trim().is_empty() {
            return Err("output_file must not be empty".to_string());
        }
        if self.header.is_empty() {
            return Err("header must have at least one column".to_string());
        }
        Ok(())
    }
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    /// Fallback filter when RUST_LOG is unset
    pub log_level: String,

    /// Page heading
    pub title: String,

    /// Directory holding topic files and the combined file
    pub data_dir: PathBuf,

    /// Run the merge once before serving
    pub merge_on_startup: bool,

    /// File read per request; defaults to the merge output.
    /// Point it at a single topic file to serve just that topic.
    pub cards_file: Option<PathBuf>,

    pub merge: MergeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_level: "info".to_string(),
            title: "N5 Vocabulary Flashcards".to_string(),
            data_dir: PathBuf::from("."),
            merge_on_startup: true,
            cards_file: None,
            merge: MergeConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn merge_output_path(&self) -> PathBuf {
        resolve(&self.data_dir, Path::new(&self.merge.output_file))
    }

    pub fn cards_path(&self) -> PathBuf {
        match &self.cards_file {
            Some(file) => resolve(&self.data_dir, file),
            None => self.merge_output_path(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("host must not be empty".to_string());
        }
        self.merge.validate()
    }
}

fn resolve(base: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        base.join(file)
    }
}
