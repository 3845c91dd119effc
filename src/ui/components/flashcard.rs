use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::CharacterEntry;
use crate::session::answer::Feedback;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub struct FlashCard<'a> {
    entry: &'a CharacterEntry,
    feedback: Feedback,
    input: &'a LineInput,
    hint: Option<char>,
    reveal_answer: bool,
    tall: bool,
    theme: &'a Theme,
}

impl<'a> FlashCard<'a> {
    pub fn new(
        entry: &'a CharacterEntry,
        feedback: Feedback,
        input: &'a LineInput,
        theme: &'a Theme,
    ) -> Self {
        Self {
            entry,
            feedback,
            input,
            hint: None,
            reveal_answer: true,
            tall: true,
            theme,
        }
    }

    pub fn hint(mut self, hint: Option<char>) -> Self {
        self.hint = hint;
        self
    }

    pub fn reveal_answer(mut self, reveal: bool) -> Self {
        self.reveal_answer = reveal;
        self
    }

    pub fn tall(mut self, tall: bool) -> Self {
        self.tall = tall;
        self
    }

    fn feedback_color(&self, idle: Color) -> Color {
        let colors = &self.theme.colors;
        match self.feedback {
            Feedback::Correct => colors.success(),
            Feedback::Incorrect => colors.error(),
            Feedback::None => idle,
        }
    }

    fn input_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        let text_style = Style::default().fg(self.feedback_color(colors.fg()));
        let (before, cursor, after) = self.input.render_parts();

        if self.feedback.is_pending() {
            return Line::from(Span::styled(self.input.value().to_string(), text_style));
        }
        if self.input.value().is_empty() {
            return Line::from(vec![
                Span::styled(" ", Style::default().bg(colors.cursor_bg())),
                Span::styled("type the romaji...", Style::default().fg(colors.muted())),
            ]);
        }

        let cursor_style = Style::default()
            .fg(colors.cursor_fg())
            .bg(colors.cursor_bg());
        let mut spans = vec![Span::styled(before.to_string(), text_style)];
        match cursor {
            Some(ch) => spans.push(Span::styled(ch.to_string(), cursor_style)),
            None => spans.push(Span::styled(" ", cursor_style)),
        }
        spans.push(Span::styled(after.to_string(), text_style));
        Line::from(spans)
    }

    fn status_line(&self) -> Line<'a> {
        let colors = &self.theme.colors;
        match (self.feedback, self.hint) {
            (Feedback::Correct, _) => Line::from(Span::styled(
                "Correct!",
                Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
            )),
            (Feedback::Incorrect, _) if self.reveal_answer => Line::from(vec![
                Span::styled("Correct answer: ", Style::default().fg(colors.error())),
                Span::styled(
                    self.entry.romaji,
                    Style::default().fg(colors.error()).add_modifier(Modifier::BOLD),
                ),
            ]),
            (Feedback::Incorrect, _) => Line::from(Span::styled(
                "Not quite.",
                Style::default().fg(colors.error()),
            )),
            (Feedback::None, Some(first)) => Line::from(vec![
                Span::styled("Hint: starts with \"", Style::default().fg(colors.muted())),
                Span::styled(
                    first.to_string(),
                    Style::default().fg(colors.hint()).add_modifier(Modifier::BOLD),
                ),
                Span::styled("\"", Style::default().fg(colors.muted())),
            ]),
            (Feedback::None, None) => Line::from(Span::styled(
                "[Tab] Show hint",
                Style::default().fg(colors.muted()),
            )),
        }
    }
}

impl Widget for FlashCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let card_height = if self.tall { 7 } else { 3 };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(card_height),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let card_width = if self.tall { 15 } else { 9 };
        let card_area = Rect {
            x: layout[0].x + layout[0].width.saturating_sub(card_width) / 2,
            width: card_width.min(layout[0].width),
            ..layout[0]
        };
        let card = Block::bordered()
            .border_style(Style::default().fg(self.feedback_color(colors.border())))
            .style(Style::default().bg(colors.bg()));
        let glyph_area = card.inner(card_area);
        card.render(card_area, buf);

        if glyph_area.height > 0 {
            let glyph_y = glyph_area.y + (glyph_area.height - 1) / 2;
            Paragraph::new(Line::from(Span::styled(
                self.entry.glyph,
                Style::default()
                    .fg(self.feedback_color(colors.glyph()))
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .render(Rect { y: glyph_y, height: 1, ..glyph_area }, buf);
        }

        let input_width = 28.min(layout[2].width);
        let input_area = Rect {
            x: layout[2].x + (layout[2].width - input_width) / 2,
            width: input_width,
            ..layout[2]
        };
        let input_border = if self.feedback.is_pending() {
            self.feedback_color(colors.border())
        } else {
            colors.border_focused()
        };
        Paragraph::new(self.input_line())
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(input_border)))
            .render(input_area, buf);

        Paragraph::new(self.status_line())
            .alignment(Alignment::Center)
            .render(layout[3], buf);
    }
}
