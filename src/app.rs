use std::time::Instant;

use crossterm::event::KeyEvent;

use crate::config::Config;
use crate::session::answer::Feedback;
use crate::session::practice::{Advance, Phase, PracticeController};
use crate::session::timer::AdvanceTimer;
use crate::ui::components::row_grid::GridCursor;
use crate::ui::layout::LayoutTier;
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::theme::Theme;

pub struct App {
    pub controller: PracticeController,
    pub config: Config,
    pub theme: Theme,
    pub input: LineInput,
    pub cursor: GridCursor,
    pub grid_columns: usize,
    pub timer: AdvanceTimer,
    pub notice: Option<&'static str>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, theme: Theme) -> Self {
        Self::with_controller(PracticeController::new(), config, theme)
    }

    pub fn with_controller(mut controller: PracticeController, config: Config, theme: Theme) -> Self {
        controller.select_rows(config.default_rows.iter().map(String::as_str));
        Self {
            controller,
            config,
            theme,
            input: LineInput::default(),
            cursor: GridCursor::default(),
            grid_columns: 1,
            timer: AdvanceTimer::new(),
            notice: None,
            should_quit: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        self.grid_columns = LayoutTier::from_area(ratatui::layout::Rect::new(0, 0, width, 1))
            .grid_columns();
    }

    // Selection screen

    pub fn move_cursor(&mut self, dx: i8, dy: i8) {
        match (dx, dy) {
            (1, _) => self.cursor.right(),
            (-1, _) => self.cursor.left(),
            (_, 1) => self.cursor.down(self.grid_columns),
            (_, -1) => self.cursor.up(self.grid_columns),
            _ => {}
        }
    }

    pub fn toggle_focused_char(&mut self) {
        let id = self.cursor.id();
        self.controller.toggle_char(id.row, id.glyph);
        self.notice = None;
    }

    pub fn toggle_focused_row(&mut self) {
        let row_id = self.cursor.row_def().id;
        self.controller.toggle_row(row_id);
        self.notice = None;
    }

    pub fn select_all(&mut self) {
        self.controller.select_all();
        self.notice = None;
    }

    pub fn clear_all(&mut self) {
        self.controller.clear_all();
    }

    pub fn start_practice(&mut self) {
        match self.controller.start_practice() {
            Ok(()) => self.begin_session(),
            Err(err) => {
                tracing::debug!(%err, "start refused");
                self.notice = Some("Select at least one character first");
            }
        }
    }

    // Practice screen

    pub fn feedback(&self) -> Feedback {
        self.controller
            .session()
            .map(|s| s.feedback())
            .unwrap_or_default()
    }

    pub fn handle_answer_key(&mut self, key: KeyEvent, now: Instant) {
        // Everything but leaving is frozen while feedback is on screen.
        let frozen = self.feedback().is_pending();
        let mut scratch = self.input.clone();
        let result = scratch.handle(key);
        if result == InputResult::Cancel {
            self.choose_different_rows();
            return;
        }
        if frozen {
            return;
        }
        self.input = scratch;

        match result {
            InputResult::Changed => self.controller.set_pending_input(self.input.value()),
            InputResult::Submit => {
                if let Some(ticket) = self.controller.submit_pending() {
                    self.timer.schedule(ticket, now, self.config.advance_delay());
                }
            }
            InputResult::Hint => self.controller.show_hint(),
            InputResult::Continue | InputResult::Cancel => {}
        }
    }

    /// Fire the pending advance once its delay has passed.
    pub fn on_tick(&mut self, now: Instant) {
        let Some(ticket) = self.timer.poll(now) else {
            return;
        };
        match self.controller.advance(ticket) {
            Advance::Next | Advance::Complete => self.input.clear(),
            Advance::Stale => {}
        }
    }

    // Completion screen

    pub fn practice_again(&mut self) {
        if self.controller.restart_with_same_pool().is_ok() {
            self.begin_session();
        }
    }

    /// Drops the session and the selection, from practice or completion.
    pub fn choose_different_rows(&mut self) {
        self.timer.cancel();
        self.controller.reset_game();
        self.input.clear();
        self.cursor = GridCursor::default();
        self.notice = None;
    }

    fn begin_session(&mut self) {
        self.timer.cancel();
        self.input.clear();
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::session::answer::Score;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_rows(rows: &[&str]) -> App {
        let config = Config {
            default_rows: rows.iter().map(|r| r.to_string()).collect(),
            ..Config::default()
        };
        App::with_controller(PracticeController::seeded(11), config, Theme::default())
    }

    fn type_answer(app: &mut App, text: &str, now: Instant) {
        for ch in text.chars() {
            app.handle_answer_key(key(KeyCode::Char(ch)), now);
        }
        app.handle_answer_key(key(KeyCode::Enter), now);
    }

    fn current_romaji(app: &App) -> &'static str {
        app.controller.session().unwrap().current().romaji
    }

    #[test]
    fn default_rows_are_preselected() {
        let app = app_with_rows(&["ka", "pa"]);
        assert_eq!(app.controller.selection().len(), 10);
        assert!(app.controller.selection().is_row_full("pa"));
    }

    #[test]
    fn empty_start_sets_notice() {
        let mut app = app_with_rows(&[]);
        app.start_practice();
        assert_eq!(app.phase(), Phase::Selection);
        assert!(app.notice.is_some());
        app.toggle_focused_char();
        assert!(app.notice.is_none());
        app.start_practice();
        assert_eq!(app.phase(), Phase::Practice);
    }

    #[test]
    fn cursor_toggles_char_and_row() {
        let mut app = app_with_rows(&[]);
        app.move_cursor(1, 0);
        app.toggle_focused_char();
        assert!(app.controller.selection().contains(crate::catalog::CharId::new("vowels", "イ")));
        app.toggle_focused_row();
        assert!(app.controller.selection().is_row_full("vowels"));
        app.toggle_focused_row();
        assert!(app.controller.selection().is_empty());
    }

    #[test]
    fn typed_answer_advances_after_delay() {
        let mut app = app_with_rows(&["vowels"]);
        app.start_practice();
        let t0 = Instant::now();

        let expected = current_romaji(&app);
        type_answer(&mut app, &expected.to_uppercase(), t0);
        assert_eq!(app.feedback(), Feedback::Correct);

        // Keys are ignored while feedback shows.
        app.handle_answer_key(key(KeyCode::Char('z')), t0);
        assert_eq!(app.input.value(), expected.to_uppercase());

        app.on_tick(t0 + Duration::from_millis(799));
        assert_eq!(app.controller.session().unwrap().position(), 0);

        app.on_tick(t0 + Duration::from_millis(800));
        let session = app.controller.session().unwrap();
        assert_eq!(session.position(), 1);
        assert_eq!(session.feedback(), Feedback::None);
        assert_eq!(app.input.value(), "");
    }

    #[test]
    fn tab_reveals_hint() {
        let mut app = app_with_rows(&["sa"]);
        app.start_practice();
        app.handle_answer_key(key(KeyCode::Tab), Instant::now());
        assert_eq!(app.controller.hint(), current_romaji(&app).chars().next());
    }

    #[test]
    fn full_run_then_practice_again() {
        let mut app = app_with_rows(&["ya"]);
        app.start_practice();
        let mut now = Instant::now();
        while app.phase() == Phase::Practice {
            let expected = current_romaji(&app);
            type_answer(&mut app, expected, now);
            now += Duration::from_secs(1);
            app.on_tick(now);
        }
        assert_eq!(app.phase(), Phase::Complete);
        assert_eq!(
            app.controller.summary().unwrap().score,
            Score { correct: 3, total: 3 }
        );

        app.practice_again();
        assert_eq!(app.phase(), Phase::Practice);
        assert_eq!(app.controller.session().unwrap().score(), Score::default());
        assert_eq!(app.controller.selection().len(), 3);
    }

    #[test]
    fn escape_mid_feedback_cancels_advance() {
        let mut app = app_with_rows(&["vowels"]);
        app.start_practice();
        let t0 = Instant::now();
        type_answer(&mut app, "x", t0);
        assert!(app.timer.is_pending());

        app.handle_answer_key(key(KeyCode::Esc), t0);
        assert_eq!(app.phase(), Phase::Selection);
        assert!(app.controller.selection().is_empty());
        assert!(!app.timer.is_pending());

        app.on_tick(t0 + Duration::from_secs(5));
        assert_eq!(app.phase(), Phase::Selection);
    }
}
