pub mod card;
pub mod deck_config;
pub mod error;
pub mod merge_report;

pub use card::{Card, DeckLoad};
pub use deck_config::{AppConfig, MergeConfig};
pub use merge_report::{MergeReport, TopicReport, TopicStatus};
