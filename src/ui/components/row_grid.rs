use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::{self, CharId, Row};
use crate::session::selection::{RowState, Selection};
use crate::ui::theme::Theme;

const CARD_HEIGHT: u16 = 4;

/// Focused character on the selection screen, as (row index, member index).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridCursor {
    pub row: usize,
    pub member: usize,
}

impl GridCursor {
    pub fn row_def(&self) -> &'static Row {
        &catalog::rows()[self.row]
    }

    pub fn id(&self) -> CharId {
        let row = self.row_def();
        CharId::new(row.id, row.members[self.member].glyph)
    }

    pub fn right(&mut self) {
        if self.member + 1 < self.row_def().len() {
            self.member += 1;
        } else if self.row + 1 < catalog::rows().len() {
            self.row += 1;
            self.member = 0;
        }
    }

    pub fn left(&mut self) {
        if self.member > 0 {
            self.member -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.member = self.row_def().len() - 1;
        }
    }

    pub fn down(&mut self, columns: usize) {
        if self.row + columns < catalog::rows().len() {
            self.row += columns;
            self.clamp_member();
        }
    }

    pub fn up(&mut self, columns: usize) {
        if self.row >= columns {
            self.row -= columns;
            self.clamp_member();
        }
    }

    fn clamp_member(&mut self) {
        self.member = self.member.min(self.row_def().len() - 1);
    }
}

pub struct RowGrid<'a> {
    selection: &'a Selection,
    cursor: GridCursor,
    columns: usize,
    theme: &'a Theme,
}

impl<'a> RowGrid<'a> {
    pub fn new(selection: &'a Selection, cursor: GridCursor, columns: usize, theme: &'a Theme) -> Self {
        Self {
            selection,
            cursor,
            columns: columns.max(1),
            theme,
        }
    }

    fn state_marker(state: RowState) -> &'static str {
        match state {
            RowState::Full => "[\u{25a0}]",
            RowState::Partial => "[\u{25aa}]",
            RowState::Empty => "[ ]",
        }
    }

    fn render_card(&self, row_idx: usize, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let row = &catalog::rows()[row_idx];
        let state = self.selection.row_state(row.id);
        let focused = self.cursor.row == row_idx;

        let border = match (focused, state) {
            (true, _) => colors.border_focused(),
            (false, RowState::Full) => colors.selected(),
            (false, RowState::Partial) => colors.partial(),
            (false, RowState::Empty) => colors.border(),
        };
        let marker_color = match state {
            RowState::Full => colors.selected(),
            RowState::Partial => colors.partial(),
            RowState::Empty => colors.muted(),
        };

        let block = Block::bordered()
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let count = format!(
            " {}/{}",
            self.selection.selected_in_row(row.id),
            row.len()
        );
        let title = Line::from(vec![
            Span::styled(
                Self::state_marker(state),
                Style::default().fg(marker_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                row.label,
                Style::default().fg(if focused { colors.accent() } else { colors.fg() }),
            ),
            Span::styled(count, Style::default().fg(colors.muted())),
        ]);

        let mut chips: Vec<Span> = Vec::with_capacity(row.len() * 2);
        for (i, entry) in row.members.iter().enumerate() {
            let selected = self.selection.contains(CharId::new(row.id, entry.glyph));
            let is_cursor = focused && self.cursor.member == i;
            let mut style = if selected {
                Style::default()
                    .fg(colors.selected())
                    .bg(colors.selected_bg())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.muted())
            };
            if is_cursor {
                style = Style::default()
                    .fg(colors.cursor_fg())
                    .bg(colors.cursor_bg())
                    .add_modifier(Modifier::BOLD);
            }
            chips.push(Span::styled(format!(" {} ", entry.glyph), style));
            chips.push(Span::raw(" "));
        }

        Paragraph::new(vec![title, Line::from(chips)]).render(inner, buf);
    }
}

impl Widget for RowGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let total_rows = catalog::rows().len();
        let grid_lines = total_rows.div_ceil(self.columns);
        let visible = ((area.height / CARD_HEIGHT) as usize).max(1);
        let cursor_line = self.cursor.row / self.columns;
        let first_line = cursor_line.saturating_sub(visible - 1);

        let line_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); visible])
            .split(area);

        for (slot, line) in (first_line..grid_lines).take(visible).enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, self.columns as u32); self.columns])
                .split(line_areas[slot]);
            for col in 0..self.columns {
                let row_idx = line * self.columns + col;
                if row_idx < total_rows {
                    self.render_card(row_idx, cells[col], buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_wraps_into_next_row() {
        let mut c = GridCursor::default();
        for _ in 0..5 {
            c.right();
        }
        assert_eq!(c, GridCursor { row: 1, member: 0 });
        c.left();
        assert_eq!(c, GridCursor { row: 0, member: 4 });
    }

    #[test]
    fn edges_do_not_move() {
        let mut c = GridCursor::default();
        c.left();
        c.up(3);
        assert_eq!(c, GridCursor::default());

        let last = catalog::rows().len() - 1;
        let mut c = GridCursor { row: last, member: 4 };
        c.right();
        c.down(1);
        assert_eq!(c, GridCursor { row: last, member: 4 });
    }

    #[test]
    fn vertical_moves_clamp_member() {
        // vowels (5) -> ya (3) with a 7-column stride
        let mut c = GridCursor { row: 0, member: 4 };
        c.down(7);
        assert_eq!(c.row_def().id, "ya");
        assert_eq!(c.member, 2);
        assert_eq!(c.id(), CharId::new("ya", "ヨ"));
    }

    #[test]
    fn renders_row_labels_and_state() {
        let theme = Theme::default();
        let mut sel = Selection::new();
        sel.toggle_row("vowels");
        sel.toggle_char("ka", "キ");

        let area = Rect::new(0, 0, 120, 8);
        let mut buf = Buffer::empty(area);
        RowGrid::new(&sel, GridCursor::default(), 3, &theme).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Vowels"));
        assert!(text.contains("5/5"));
        assert!(text.contains("1/5"));
        assert!(text.contains("0/5"));
    }
}
