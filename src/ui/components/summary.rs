use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::answer::{Grade, Summary};
use crate::ui::theme::Theme;

pub struct SummaryPanel<'a> {
    pub summary: &'a Summary,
    pub theme: &'a Theme,
}

impl<'a> SummaryPanel<'a> {
    pub fn new(summary: &'a Summary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for SummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let score = self.summary.score;

        let block = Block::bordered()
            .title(" Practice Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let grade_color = match self.summary.grade {
            Grade::Perfect => colors.success(),
            Grade::Great => colors.accent(),
            Grade::KeepPracticing => colors.warning(),
        };
        Paragraph::new(Line::from(Span::styled(
            self.summary.grade.headline(),
            Style::default().fg(grade_color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        Paragraph::new(Line::from(vec![
            Span::styled(
                score.correct.to_string(),
                Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" / ", Style::default().fg(colors.muted())),
            Span::styled(
                score.total.to_string(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        Paragraph::new(Line::from(Span::styled(
            format!("{}% accuracy", self.summary.accuracy_percent),
            Style::default().fg(grade_color),
        )))
        .alignment(Alignment::Center)
        .render(layout[3], buf);

        let misses = score.incorrect();
        let misses_text = match misses {
            0 => "No misses".to_string(),
            1 => "1 miss".to_string(),
            n => format!("{n} misses"),
        };
        Paragraph::new(Line::from(Span::styled(
            misses_text,
            Style::default().fg(if misses == 0 {
                colors.success()
            } else {
                colors.error()
            }),
        )))
        .alignment(Alignment::Center)
        .render(layout[4], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("[r/Enter] Practice again  ", Style::default().fg(colors.accent())),
            Span::styled("[s] Choose different rows  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Quit", Style::default().fg(colors.accent())),
        ]))
        .alignment(Alignment::Center)
        .render(layout[6], buf);
    }
}
