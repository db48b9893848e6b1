pub mod use_cases;

pub use use_cases::card_reader::CardReader;
pub use use_cases::vocab_merger::VocabMerger;
