// ============================================================
// CARD TYPES
// ============================================================
// One flashcard per accepted data row, and the outcome of a deck read

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single flashcard: header-keyed values in column order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    fields: Vec<(String, String)>,
}

impl Card {
    /// Build a card by zipping header names with row values
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            fields: pairs.into_iter().collect(),
        }
    }

    /// Value of the first column named `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Outcome of reading a deck file for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckLoad {
    /// Header found; every well-formed row became a card
    Cards {
        cards: Vec<Card>,
        skipped_rows: usize,
    },

    /// The file has no rows at all, not even a header
    EmptyFile,

    /// The file does not exist
    MissingFile,

    /// Any other read failure; the message is for logs only
    ReadError(String),
}

pub const MISSING_FILE_MESSAGE: &str = "Data file missing.";
pub const READ_ERROR_MESSAGE: &str = "An unexpected error occurred.";

impl DeckLoad {
    pub fn cards(&self) -> &[Card] {
        match self {
            DeckLoad::Cards { cards, .. } => cards,
            _ => &[],
        }
    }

    pub fn into_cards(self) -> Vec<Card> {
        match self {
            DeckLoad::Cards { cards, .. } => cards,
            _ => Vec::new(),
        }
    }

    pub fn skipped_rows(&self) -> usize {
        match self {
            DeckLoad::Cards { skipped_rows, .. } => *skipped_rows,
            _ => 0,
        }
    }

    /// Message shown to the reader of the page, if any
    pub fn user_error(&self) -> Option<&'static str> {
        match self {
            DeckLoad::MissingFile => Some(MISSING_FILE_MESSAGE),
            DeckLoad::ReadError(_) => Some(READ_ERROR_MESSAGE),
            DeckLoad::Cards { .. } | DeckLoad::EmptyFile => None,
        }
    }
}
