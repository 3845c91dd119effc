use std::collections::BTreeSet;

use crate::catalog::{self, CharId, CharacterEntry, Row};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowState {
    Empty,
    Partial,
    Full,
}

/// The set of selected characters. Row-level state is always computed from
/// the identity set and never stored alongside it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<CharId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            ids: catalog::all_ids().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: CharId) -> bool {
        self.ids.contains(&id)
    }

    pub fn toggle_row(&mut self, row_id: &str) {
        let row = lookup_row(row_id);
        if self.row_state(row_id) == RowState::Full {
            for id in row.ids() {
                self.ids.remove(&id);
            }
        } else {
            self.ids.extend(row.ids());
        }
    }

    pub fn toggle_char(&mut self, row_id: &str, glyph: &str) {
        let row = lookup_row(row_id);
        let Some(id) = row.ids().find(|id| id.glyph == glyph) else {
            panic!("glyph {glyph} is not in row '{row_id}'");
        };
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn select_rows<'a>(&mut self, row_ids: impl IntoIterator<Item = &'a str>) {
        for row_id in row_ids {
            self.ids.extend(lookup_row(row_id).ids());
        }
    }

    pub fn select_all(&mut self) {
        self.ids = catalog::all_ids().collect();
    }

    pub fn clear_all(&mut self) {
        self.ids.clear();
    }

    pub fn selected_in_row(&self, row_id: &str) -> usize {
        lookup_row(row_id)
            .ids()
            .filter(|id| self.ids.contains(id))
            .count()
    }

    pub fn row_state(&self, row_id: &str) -> RowState {
        let row = lookup_row(row_id);
        match self.selected_in_row(row_id) {
            0 => RowState::Empty,
            n if n == row.len() => RowState::Full,
            _ => RowState::Partial,
        }
    }

    pub fn is_row_full(&self, row_id: &str) -> bool {
        self.row_state(row_id) == RowState::Full
    }

    /// Selected entries in catalog display order.
    pub fn entries(&self) -> Vec<CharacterEntry> {
        catalog::rows()
            .iter()
            .flat_map(|row| {
                row.members
                    .iter()
                    .filter(move |e| self.ids.contains(&CharId::new(row.id, e.glyph)))
                    .copied()
            })
            .collect()
    }
}

fn lookup_row(row_id: &str) -> &'static Row {
    match catalog::row(row_id) {
        Some(row) => row,
        None => panic!("row '{row_id}' is not in the catalog"),
    }
}
