pub mod card_reader;
pub mod vocab_merger;
