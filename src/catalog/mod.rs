pub mod katakana;

use thiserror::Error;

pub use katakana::ROWS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CharacterEntry {
    pub glyph: &'static str,
    pub romaji: &'static str,
}

impl CharacterEntry {
    pub const fn new(glyph: &'static str, romaji: &'static str) -> Self {
        Self { glyph, romaji }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Row {
    pub id: &'static str,
    pub label: &'static str,
    pub members: &'static [CharacterEntry],
}

impl Row {
    pub fn ids(&'static self) -> impl Iterator<Item = CharId> + 'static {
        self.members.iter().map(move |e| CharId::new(self.id, e.glyph))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Selection identity. A glyph alone does not say which row it came from, so
/// the row id is always part of the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharId {
    pub row: &'static str,
    pub glyph: &'static str,
}

impl CharId {
    pub const fn new(row: &'static str, glyph: &'static str) -> Self {
        Self { row, glyph }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown row '{0}' (see --list-rows)")]
    UnknownRow(String),
}

pub fn rows() -> &'static [Row] {
    ROWS
}

pub fn row(id: &str) -> Option<&'static Row> {
    ROWS.iter().find(|r| r.id == id)
}

/// Resolve a user-supplied row id, case-insensitively.
pub fn parse_row(id: &str) -> Result<&'static Row, CatalogError> {
    let needle = id.trim().to_lowercase();
    ROWS.iter()
        .find(|r| r.id == needle)
        .ok_or_else(|| CatalogError::UnknownRow(id.trim().to_string()))
}

pub fn entry(id: CharId) -> Option<&'static CharacterEntry> {
    row(id.row)?.members.iter().find(|e| e.glyph == id.glyph)
}

pub fn all_ids() -> impl Iterator<Item = CharId> {
    ROWS.iter().flat_map(Row::ids)
}

pub fn total_chars() -> usize {
    ROWS.iter().map(Row::len).sum()
}
