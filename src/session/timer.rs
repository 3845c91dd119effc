use std::time::{Duration, Instant};

use crate::session::practice::AdvanceTicket;

/// One-shot deferred advance, polled from the event loop tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdvanceTimer {
    pending: Option<(AdvanceTicket, Instant)>,
}

impl AdvanceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previously scheduled ticket.
    pub fn schedule(&mut self, ticket: AdvanceTicket, now: Instant, delay: Duration) {
        self.pending = Some((ticket, now + delay));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending.map(|(_, due)| due.saturating_duration_since(now))
    }

    /// Hands out the ticket once its delay has elapsed, then forgets it.
    pub fn poll(&mut self, now: Instant) -> Option<AdvanceTicket> {
        match self.pending {
            Some((ticket, due)) if now >= due => {
                self.pending = None;
                Some(ticket)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::practice::PracticeController;

    fn ticket() -> AdvanceTicket {
        let mut ctl = PracticeController::seeded(3);
        ctl.toggle_row("vowels");
        ctl.start_practice().unwrap();
        ctl.submit_answer("a").unwrap()
    }

    #[test]
    fn fires_once_after_delay() {
        let t0 = Instant::now();
        let mut timer = AdvanceTimer::new();
        let tk = ticket();
        timer.schedule(tk, t0, Duration::from_millis(800));

        assert_eq!(timer.poll(t0 + Duration::from_millis(799)), None);
        assert_eq!(
            timer.remaining(t0 + Duration::from_millis(300)),
            Some(Duration::from_millis(500))
        );
        assert_eq!(timer.poll(t0 + Duration::from_millis(800)), Some(tk));
        assert_eq!(timer.poll(t0 + Duration::from_millis(900)), None);
        assert!(!timer.is_pending());
    }

    #[test]
    fn cancel_drops_ticket() {
        let t0 = Instant::now();
        let mut timer = AdvanceTimer::new();
        timer.schedule(ticket(), t0, Duration::from_millis(10));
        timer.cancel();
        assert_eq!(timer.poll(t0 + Duration::from_secs(1)), None);
        assert_eq!(timer.remaining(t0), None);
    }
}
