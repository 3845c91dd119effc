use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::CharacterEntry;
use crate::session::answer::{self, Feedback, Score, Summary};
use crate::session::selection::{RowState, Selection};
use crate::session::shuffle::shuffle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Selection,
    Practice,
    Complete,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("select at least one character before starting")]
    EmptySelection,
}

/// Proof that an answer was judged in a particular session. Redeemed by
/// [`PracticeController::advance`] once the feedback delay has elapsed; a
/// ticket from a session that has since been reset or restarted is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceTicket {
    generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Next,
    Complete,
    Stale,
}

pub struct PracticeSession {
    queue: Vec<CharacterEntry>,
    position: usize,
    score: Score,
    pending_input: String,
    feedback: Feedback,
    hint_shown: bool,
}

impl PracticeSession {
    fn new(queue: Vec<CharacterEntry>) -> Self {
        Self {
            queue,
            position: 0,
            score: Score::default(),
            pending_input: String::new(),
            feedback: Feedback::None,
            hint_shown: false,
        }
    }

    pub fn queue(&self) -> &[CharacterEntry] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> &CharacterEntry {
        &self.queue[self.position]
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn hint_shown(&self) -> bool {
        self.hint_shown
    }

    pub fn hint(&self) -> Option<char> {
        if self.hint_shown {
            self.current().romaji.chars().next()
        } else {
            None
        }
    }

    /// Percentage of the queue reached, counting the item on screen.
    pub fn progress_percent(&self) -> f64 {
        if self.queue.is_empty() {
            return 0.0;
        }
        (self.position + 1) as f64 / self.queue.len() as f64 * 100.0
    }

    fn is_last(&self) -> bool {
        self.position + 1 >= self.queue.len()
    }
}

/// Owns the selection, the phase and the running session. The UI reads state
/// from here and forwards intents; it never judges or shuffles by itself.
pub struct PracticeController<R: Rng = SmallRng> {
    phase: Phase,
    selection: Selection,
    session: Option<PracticeSession>,
    generation: u64,
    rng: R,
}

impl PracticeController<SmallRng> {
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl Default for PracticeController<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PracticeController<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            phase: Phase::Selection,
            selection: Selection::new(),
            session: None,
            generation: 0,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn session(&self) -> Option<&PracticeSession> {
        self.session.as_ref()
    }

    pub fn row_state(&self, row_id: &str) -> RowState {
        self.selection.row_state(row_id)
    }

    pub fn can_start(&self) -> bool {
        !self.selection.is_empty()
    }

    // Selection edits are only offered on the selection screen.

    pub fn toggle_row(&mut self, row_id: &str) {
        if self.editable() {
            self.selection.toggle_row(row_id);
        }
    }

    pub fn toggle_char(&mut self, row_id: &str, glyph: &str) {
        if self.editable() {
            self.selection.toggle_char(row_id, glyph);
        }
    }

    pub fn select_rows<'a>(&mut self, row_ids: impl IntoIterator<Item = &'a str>) {
        if self.editable() {
            self.selection.select_rows(row_ids);
        }
    }

    pub fn select_all(&mut self) {
        if self.editable() {
            self.selection.select_all();
        }
    }

    pub fn clear_all(&mut self) {
        if self.editable() {
            self.selection.clear_all();
        }
    }

    fn editable(&self) -> bool {
        debug_assert_eq!(self.phase, Phase::Selection, "selection edited mid-session");
        self.phase == Phase::Selection
    }

    pub fn start_practice(&mut self) -> Result<(), SessionError> {
        debug_assert_ne!(self.phase, Phase::Practice, "practice started mid-session");
        if self.selection.is_empty() {
            debug!("start rejected: empty selection");
            return Err(SessionError::EmptySelection);
        }
        let mut queue = self.selection.entries();
        shuffle(&mut queue, &mut self.rng);

        self.generation += 1;
        info!(
            items = queue.len(),
            generation = self.generation,
            "practice started"
        );
        self.session = Some(PracticeSession::new(queue));
        self.phase = Phase::Practice;
        Ok(())
    }

    pub fn restart_with_same_pool(&mut self) -> Result<(), SessionError> {
        debug_assert_eq!(self.phase, Phase::Complete);
        self.start_practice()
    }

    pub fn reset_game(&mut self) {
        self.generation += 1;
        self.session = None;
        self.selection.clear_all();
        self.phase = Phase::Selection;
        info!(generation = self.generation, "game reset");
    }

    fn active_session(&mut self) -> Option<&mut PracticeSession> {
        if self.phase != Phase::Practice {
            return None;
        }
        self.session.as_mut()
    }

    /// Mirror of the learner's in-progress text. Frozen while feedback shows.
    pub fn set_pending_input(&mut self, text: &str) {
        if let Some(session) = self.active_session() {
            if !session.feedback.is_pending() {
                session.pending_input.clear();
                session.pending_input.push_str(text);
            }
        }
    }

    pub fn show_hint(&mut self) {
        if let Some(session) = self.active_session() {
            if !session.feedback.is_pending() {
                session.hint_shown = true;
            }
        }
    }

    pub fn hint(&self) -> Option<char> {
        self.session.as_ref().and_then(PracticeSession::hint)
    }

    pub fn submit_pending(&mut self) -> Option<AdvanceTicket> {
        let text = self.session.as_ref()?.pending_input.clone();
        self.submit_answer(&text)
    }

    /// Judge `text` against the current item. Blank input, or a second submit
    /// while feedback is still showing, changes nothing and returns `None`.
    pub fn submit_answer(&mut self, text: &str) -> Option<AdvanceTicket> {
        let generation = self.generation;
        let session = self.active_session()?;
        if session.feedback.is_pending() || answer::is_blank(text) {
            return None;
        }

        let expected = session.current().romaji;
        let feedback = Feedback::judge(text, expected);
        session.pending_input.clear();
        session.pending_input.push_str(text);
        session.feedback = feedback;
        session.score.record(feedback);
        debug_assert!(session.score.total <= session.queue.len());
        debug!(
            glyph = session.current().glyph,
            expected,
            ?feedback,
            correct = session.score.correct,
            total = session.score.total,
            "answer judged"
        );
        Some(AdvanceTicket { generation })
    }

    pub fn advance(&mut self, ticket: AdvanceTicket) -> Advance {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "stale advance ignored"
            );
            return Advance::Stale;
        }
        let Some(session) = self.active_session() else {
            return Advance::Stale;
        };
        if !session.feedback.is_pending() {
            return Advance::Stale;
        }

        if session.is_last() {
            let score = session.score;
            self.phase = Phase::Complete;
            info!(correct = score.correct, total = score.total, "practice complete");
            Advance::Complete
        } else {
            session.position += 1;
            session.pending_input.clear();
            session.feedback = Feedback::None;
            session.hint_shown = false;
            Advance::Next
        }
    }

    pub fn summary(&self) -> Option<Summary> {
        if self.phase != Phase::Complete {
            return None;
        }
        self.session.as_ref().map(|s| Summary::from_score(s.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::answer::Grade;

    fn started(rows: &[&str]) -> PracticeController {
        let mut ctl = PracticeController::seeded(7);
        ctl.select_rows(rows.iter().copied());
        ctl.start_practice().unwrap();
        ctl
    }

    fn answer_current(ctl: &mut PracticeController, right: bool) -> AdvanceTicket {
        let expected = ctl.session().unwrap().current().romaji;
        let text = if right { expected } else { "xx" };
        ctl.submit_answer(text).unwrap()
    }

    #[test]
    fn empty_selection_cannot_start() {
        let mut ctl = PracticeController::seeded(1);
        assert!(!ctl.can_start());
        assert_eq!(ctl.start_practice(), Err(SessionError::EmptySelection));
        assert_eq!(ctl.phase(), Phase::Selection);
        assert!(ctl.session().is_none());
    }

    #[test]
    fn start_builds_fresh_session() {
        let ctl = started(&["ka", "sa"]);
        let session = ctl.session().unwrap();
        assert_eq!(ctl.phase(), Phase::Practice);
        assert_eq!(session.len(), 10);
        assert_eq!(session.position(), 0);
        assert_eq!(session.score(), Score::default());
        assert_eq!(session.feedback(), Feedback::None);
        assert_eq!(session.pending_input(), "");
        assert!(!session.hint_shown());
    }

    #[test]
    fn blank_submission_is_ignored() {
        let mut ctl = started(&["vowels"]);
        assert_eq!(ctl.submit_answer("   "), None);
        assert_eq!(ctl.submit_answer(""), None);
        let session = ctl.session().unwrap();
        assert_eq!(session.score(), Score::default());
        assert_eq!(session.feedback(), Feedback::None);
    }

    #[test]
    fn second_submit_while_feedback_pending_is_ignored() {
        let mut ctl = started(&["vowels"]);
        answer_current(&mut ctl, true);
        assert_eq!(ctl.submit_answer("a"), None);
        assert_eq!(ctl.session().unwrap().score().total, 1);
    }

    #[test]
    fn advance_resets_item_state() {
        let mut ctl = started(&["vowels"]);
        ctl.show_hint();
        assert!(ctl.hint().is_some());
        ctl.set_pending_input("zz");
        let ticket = ctl.submit_pending().unwrap();
        assert_eq!(ctl.session().unwrap().feedback(), Feedback::Incorrect);

        assert_eq!(ctl.advance(ticket), Advance::Next);
        let session = ctl.session().unwrap();
        assert_eq!(session.position(), 1);
        assert_eq!(session.feedback(), Feedback::None);
        assert_eq!(session.pending_input(), "");
        assert_eq!(ctl.hint(), None);
    }

    #[test]
    fn ticket_redeems_only_once() {
        let mut ctl = started(&["vowels"]);
        let ticket = answer_current(&mut ctl, true);
        assert_eq!(ctl.advance(ticket), Advance::Next);
        assert_eq!(ctl.advance(ticket), Advance::Stale);
        assert_eq!(ctl.session().unwrap().position(), 1);
    }

    #[test]
    fn hint_is_first_romaji_char() {
        let mut ctl = started(&["ta"]);
        assert_eq!(ctl.hint(), None);
        ctl.show_hint();
        let expected = ctl.session().unwrap().current().romaji;
        assert_eq!(ctl.hint(), expected.chars().next());
        // Hints never touch the score.
        assert_eq!(ctl.session().unwrap().score(), Score::default());
    }

    #[test]
    fn input_frozen_while_feedback_shows() {
        let mut ctl = started(&["vowels"]);
        ctl.set_pending_input("q");
        ctl.submit_pending().unwrap();
        ctl.set_pending_input("other");
        assert_eq!(ctl.session().unwrap().pending_input(), "q");
    }

    #[test]
    fn last_answer_completes() {
        let mut ctl = started(&["ya"]);
        for i in 0..3 {
            let ticket = answer_current(&mut ctl, i != 1);
            let expected = if i == 2 { Advance::Complete } else { Advance::Next };
            assert_eq!(ctl.advance(ticket), expected);
        }
        assert_eq!(ctl.phase(), Phase::Complete);
        let summary = ctl.summary().unwrap();
        assert_eq!(summary.score, Score { correct: 2, total: 3 });
        assert_eq!(summary.grade, Grade::KeepPracticing);
    }

    #[test]
    fn progress_counts_current_item() {
        let mut ctl = started(&["vowels"]);
        assert_eq!(ctl.session().unwrap().progress_percent(), 20.0);
        let ticket = answer_current(&mut ctl, true);
        ctl.advance(ticket);
        assert_eq!(ctl.session().unwrap().progress_percent(), 40.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "practice started mid-session")]
    fn start_during_practice_fails_fast() {
        let mut ctl = started(&["ka"]);
        let _ = ctl.start_practice();
    }

    #[test]
    fn restart_keeps_pool_and_resets_score() {
        let mut ctl = started(&["ya"]);
        while ctl.phase() == Phase::Practice {
            let ticket = answer_current(&mut ctl, false);
            ctl.advance(ticket);
        }
        let pool = ctl.selection().clone();
        ctl.restart_with_same_pool().unwrap();
        assert_eq!(ctl.phase(), Phase::Practice);
        assert_eq!(ctl.selection(), &pool);
        let session = ctl.session().unwrap();
        assert_eq!(session.score(), Score::default());
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn reset_invalidates_outstanding_ticket() {
        let mut ctl = started(&["vowels"]);
        let ticket = answer_current(&mut ctl, true);
        ctl.reset_game();
        assert_eq!(ctl.phase(), Phase::Selection);
        assert!(ctl.selection().is_empty());
        assert!(ctl.session().is_none());

        ctl.toggle_row("ka");
        ctl.start_practice().unwrap();
        assert_eq!(ctl.advance(ticket), Advance::Stale);
        let session = ctl.session().unwrap();
        assert_eq!(session.position(), 0);
        assert_eq!(session.score(), Score::default());
    }

    #[test]
    fn summary_only_when_complete() {
        let ctl = started(&["vowels"]);
        assert!(ctl.summary().is_none());
    }
}
