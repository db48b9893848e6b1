// ============================================================
// VOCAB MERGER USE CASE
// ============================================================
// Concatenate numbered topic files into one combined CSV

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::domain::deck_config::MergeConfig;
use crate::domain::error::{AppError, Result};
use crate::domain::merge_report::{MergeReport, TopicStatus};
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::storage::{remove_if_exists, replace_file, temp_sibling};
use crate::interfaces::http::{add_log, SharedLogs};

pub struct VocabMerger {
    config: MergeConfig,
    data_dir: PathBuf,
    logs: SharedLogs,
}

impl VocabMerger {
    pub fn new(config: MergeConfig, data_dir: impl Into<PathBuf>, logs: SharedLogs) -> Self {
        Self {
            config,
            data_dir: data_dir.into(),
            logs,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.config.output_file)
    }

    /// Merge every topic file in the configured range into the combined file.
    ///
    /// The combined file is built under a temporary name and renamed into
    /// place, so concurrent readers see either the old file or the new one.
    /// Only a failure to create or finish the output is an error; unreadable
    /// topic files are reported in the returned `MergeReport`.
    pub fn merge(&self) -> Result<MergeReport> {
        self.config
            .validate()
            .map_err(|e| AppError::ValidationError(format!("Invalid merge config: {}", e)))?;

        let output_path = self.output_path();
        let temp_path = temp_sibling(&output_path);

        add_log(
            &self.logs,
            "INFO",
            "Merge",
            &format!(
                "Starting CSV consolidation. Looking for files from {} up to {}",
                self.config.topic_file_name(self.config.range_start),
                self.config.topic_file_name(self.config.range_end)
            ),
        );

        let output = File::create(&temp_path).map_err(|err| {
            add_log(
                &self.logs,
                "ERROR",
                "Merge",
                &format!(
                    "An error occurred while handling the output file {}: {}",
                    output_path.display(),
                    err
                ),
            );
            AppError::IoError(format!(
                "Failed to open output file {}: {}",
                output_path.display(),
                err
            ))
        })?;

        let mut writer = CsvParser::new().writer(output);
        if let Err(err) = writer.write_record(&self.config.header) {
            drop(writer);
            self.discard(&temp_path);
            return Err(AppError::IoError(format!(
                "Failed to write header to {}: {}",
                output_path.display(),
                err
            )));
        }

        let mut report = MergeReport::default();
        for number in self.config.range_start..=self.config.range_end {
            let file_name = self.config.topic_file_name(number);
            let topic_path = self.data_dir.join(&file_name);

            let status = if topic_path.is_file() {
                self.append_topic(&topic_path, &mut writer)
            } else {
                TopicStatus::NotFound
            };
            self.log_topic(&file_name, &status);
            report.record(number, file_name, status);
        }

        if report.found_files == 0 {
            drop(writer);
            self.discard(&temp_path);
            if let Err(err) = remove_if_exists(&output_path) {
                add_log(
                    &self.logs,
                    "WARN",
                    "Merge",
                    &format!("Could not remove stale {}: {}", output_path.display(), err),
                );
            }
            add_log(
                &self.logs,
                "INFO",
                "Merge",
                "No CSV files were found to combine. Exiting.",
            );
            return Ok(report);
        }

        if let Err(err) = self.finish(writer, &temp_path, &output_path) {
            self.discard(&temp_path);
            add_log(&self.logs, "ERROR", "Merge", &err.to_string());
            return Err(err);
        }

        add_log(
            &self.logs,
            "INFO",
            "Merge",
            &format!(
                "Successfully combined data from {} files. Total rows written to file: {}. All data saved to {}",
                report.found_files,
                report.total_rows,
                output_path.display()
            ),
        );
        report.output = Some(output_path);
        Ok(report)
    }

    /// Copy every row after the first from `path` into `writer`
    fn append_topic<W: Write>(&self, path: &Path, writer: &mut Writer<W>) -> TopicStatus {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                return TopicStatus::Failed {
                    rows_appended: 0,
                    error: err.to_string(),
                }
            }
        };

        let mut reader = CsvParser::new().reader(file);
        let mut records = reader.records();

        match records.next() {
            None => return TopicStatus::Empty,
            Some(Err(err)) => {
                return TopicStatus::Failed {
                    rows_appended: 0,
                    error: err.to_string(),
                }
            }
            Some(Ok(_header)) => {}
        }

        let mut rows = 0;
        for record in records {
            let written = record
                .map_err(AppError::from)
                .and_then(|row| writer.write_record(&row).map_err(AppError::from));
            if let Err(err) = written {
                return TopicStatus::Failed {
                    rows_appended: rows,
                    error: err.to_string(),
                };
            }
            rows += 1;
        }

        TopicStatus::Appended { rows }
    }

    fn finish(&self, writer: Writer<File>, temp_path: &Path, output_path: &Path) -> Result<()> {
        let file = writer.into_inner().map_err(|err| {
            AppError::IoError(format!(
                "Failed to flush {}: {}",
                output_path.display(),
                err.error()
            ))
        })?;
        file.sync_all()?;
        drop(file);

        replace_file(temp_path, output_path).map_err(|err| {
            AppError::IoError(format!(
                "Failed to move combined file into {}: {}",
                output_path.display(),
                err
            ))
        })
    }

    fn discard(&self, temp_path: &Path) {
        if let Err(err) = remove_if_exists(temp_path) {
            add_log(
                &self.logs,
                "WARN",
                "Merge",
                &format!("Could not remove {}: {}", temp_path.display(), err),
            );
        }
    }

    fn log_topic(&self, file_name: &str, status: &TopicStatus) {
        match status {
            TopicStatus::NotFound => add_log(
                &self.logs,
                "INFO",
                "Merge",
                &format!("File not found: {}", file_name),
            ),
            TopicStatus::Empty => add_log(
                &self.logs,
                "INFO",
                "Merge",
                &format!("Found {} but it is empty (Skipping)", file_name),
            ),
            TopicStatus::Appended { rows } => add_log(
                &self.logs,
                "INFO",
                "Merge",
                &format!("Found and read {}: appended {} data rows", file_name, rows),
            ),
            TopicStatus::Failed {
                rows_appended,
                error,
            } => add_log(
                &self.logs,
                "WARN",
                "Merge",
                &format!(
                    "Error reading or writing data from {} after {} rows: {}",
                    file_name, rows_appended, error
                ),
            ),
        }
    }
}
