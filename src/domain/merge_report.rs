use std::path::PathBuf;

/// What happened to one candidate topic file during a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicStatus {
    NotFound,
    /// Present but without even a header row
    Empty,
    Appended { rows: usize },
    /// Reading stopped part way; rows appended before the failure stay
    Failed { rows_appended: usize, error: String },
}

impl TopicStatus {
    pub fn is_found(&self) -> bool {
        !matches!(self, TopicStatus::NotFound)
    }

    pub fn rows(&self) -> usize {
        match self {
            TopicStatus::Appended { rows } => *rows,
            TopicStatus::Failed { rows_appended, .. } => *rows_appended,
            TopicStatus::NotFound | TopicStatus::Empty => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TopicReport {
    pub number: u32,
    pub file_name: String,
    pub status: TopicStatus,
}

#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    pub topics: Vec<TopicReport>,
    pub found_files: usize,
    pub total_rows: usize,
    /// Where the combined file was written; `None` when nothing was found
    pub output: Option<PathBuf>,
}

impl MergeReport {
    pub fn record(&mut self, number: u32, file_name: String, status: TopicStatus) {
        if status.is_found() {
            self.found_files += 1;
        }
        self.total_rows += status.rows();
        self.topics.push(TopicReport {
            number,
            file_name,
            status,
        });
    }

    pub fn status_of(&self, number: u32) -> Option<&TopicStatus> {
        self.topics
            .iter()
            .find(|topic| topic.number == number)
            .map(|topic| &topic.status)
    }
}
