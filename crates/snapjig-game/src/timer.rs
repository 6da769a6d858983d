//! Wall-clock timer driver and elapsed-time formatting.

use std::time::{Duration, Instant};

use crate::{Session, SessionTransition};

/// Advances the session clock once per wall-clock second.
///
/// The driver is polled with the current time (typically once per UI
/// frame). While the session is started and not complete, each full
/// second since the last tick applies `UpdateTimer(elapsed + 1)`.
/// Ticks are best-effort: the driver re-anchors on every tick, so time
/// lost to a suspended host is dropped rather than replayed. When the
/// gate closes (completion, reset, or no game), the anchor is cleared
/// and no state leaks into the next game.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use snapjig_game::{Session, SessionTransition, TimerDriver};
///
/// let mut session = Session::new();
/// session.apply(SessionTransition::StartGame);
///
/// let mut timer = TimerDriver::new();
/// let start = Instant::now();
/// timer.poll(start, &mut session);
/// timer.poll(start + Duration::from_secs(1), &mut session);
/// assert_eq!(session.elapsed_seconds(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerDriver {
    last_tick: Option<Instant>,
}

impl TimerDriver {
    /// Tick period: one wall-clock second.
    pub const PERIOD: Duration = Duration::from_secs(1);

    /// Creates an unanchored driver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the driver is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    /// Polls the driver at `now`, ticking the session clock if a full
    /// period has elapsed. Returns `true` if a tick was applied.
    pub fn poll(&mut self, now: Instant, session: &mut Session) -> bool {
        if !session.is_started() || session.is_complete() {
            self.last_tick = None;
            return false;
        }

        let Some(last) = self.last_tick else {
            // First poll of a running game anchors the clock.
            self.last_tick = Some(now);
            return false;
        };

        if now.duration_since(last) < Self::PERIOD {
            return false;
        }

        session.apply(SessionTransition::UpdateTimer(
            session.elapsed_seconds() + 1,
        ));
        self.last_tick = Some(now);
        true
    }
}

/// Formats whole seconds as `MM:SS`.
///
/// Both fields are zero-padded to two digits; minutes are not reduced
/// to hours and may exceed 59.
///
/// # Examples
///
/// ```
/// use snapjig_game::format_elapsed;
///
/// assert_eq!(format_elapsed(0), "00:00");
/// assert_eq!(format_elapsed(65), "01:05");
/// assert_eq!(format_elapsed(3_725), "62:05");
/// ```
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_session() -> Session {
        let mut session = Session::new();
        session.apply(SessionTransition::StartGame);
        session
    }

    #[test]
    fn five_ticks_elapse_five_seconds() {
        let mut session = running_session();
        let mut timer = TimerDriver::new();

        let start = Instant::now();
        timer.poll(start, &mut session);
        for i in 1..=5 {
            let ticked = timer.poll(start + Duration::from_secs(i), &mut session);
            assert!(ticked);
        }
        assert_eq!(session.elapsed_seconds(), 5);
    }

    #[test]
    fn sub_second_polls_do_not_tick() {
        let mut session = running_session();
        let mut timer = TimerDriver::new();

        let start = Instant::now();
        timer.poll(start, &mut session);
        assert!(!timer.poll(start + Duration::from_millis(300), &mut session));
        assert!(!timer.poll(start + Duration::from_millis(900), &mut session));
        assert_eq!(session.elapsed_seconds(), 0);

        assert!(timer.poll(start + Duration::from_millis(1_000), &mut session));
        assert_eq!(session.elapsed_seconds(), 1);
    }

    #[test]
    fn missed_ticks_are_not_replayed() {
        let mut session = running_session();
        let mut timer = TimerDriver::new();

        let start = Instant::now();
        timer.poll(start, &mut session);
        // Host was suspended for ten seconds; only one tick fires.
        assert!(timer.poll(start + Duration::from_secs(10), &mut session));
        assert_eq!(session.elapsed_seconds(), 1);
    }

    #[test]
    fn completion_stops_the_clock() {
        let mut session = running_session();
        let mut timer = TimerDriver::new();

        let start = Instant::now();
        timer.poll(start, &mut session);
        timer.poll(start + Duration::from_secs(1), &mut session);
        session.apply(SessionTransition::CompleteGame);

        assert!(!timer.poll(start + Duration::from_secs(2), &mut session));
        assert!(!timer.is_running());
        assert_eq!(session.elapsed_seconds(), 1);
    }

    #[test]
    fn reset_stops_and_unanchors() {
        let mut session = running_session();
        let mut timer = TimerDriver::new();

        let start = Instant::now();
        timer.poll(start, &mut session);
        session.apply(SessionTransition::ResetGame);
        assert!(!timer.poll(start + Duration::from_secs(5), &mut session));
        assert!(!timer.is_running());

        // A restarted game re-anchors instead of ticking immediately.
        session.apply(SessionTransition::StartGame);
        assert!(!timer.poll(start + Duration::from_secs(6), &mut session));
        assert!(timer.poll(start + Duration::from_secs(7), &mut session));
        assert_eq!(session.elapsed_seconds(), 1);
    }

    #[test]
    fn formats_minutes_and_seconds_zero_padded() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(9), "00:09");
        assert_eq!(format_elapsed(60), "01:00");
        assert_eq!(format_elapsed(65), "01:05");
        assert_eq!(format_elapsed(59 * 60 + 59), "59:59");
        assert_eq!(format_elapsed(100 * 60 + 1), "100:01");
    }
}
