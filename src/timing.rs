use std::time::{Duration, Instant};

/// A free-running fixed-period timer. Deadlines advance by whole periods
/// (`next = last + period`), so a stalled loop catches up instead of
/// drifting. Render and beep cadences are independent instances; nothing
/// synchronizes them.
pub struct Cadence {
    period: Duration,
    next: Instant,
}

impl Cadence {
    pub fn new(period: Duration) -> Self {
        Self::starting_at(Instant::now(), period)
    }

    pub fn starting_at(start: Instant, period: Duration) -> Self {
        Self {
            period,
            next: start + period,
        }
    }

    /// True once per elapsed period. Call again with the same `now` to
    /// drain any backlog after a stall.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now >= self.next {
            self.next += self.period;
            true
        } else {
            false
        }
    }

    /// The next instant at which `poll` will fire; the event loop sleeps
    /// until the earliest deadline across all cadences.
    pub fn next_deadline(&self) -> Instant {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fires_within(period: Duration, horizon: Duration, step: Duration) -> u32 {
        let start = Instant::now();
        let mut cadence = Cadence::starting_at(start, period);
        let mut fired = 0;
        let mut elapsed = Duration::ZERO;
        while elapsed < horizon {
            elapsed += step;
            if cadence.poll(start + elapsed) {
                fired += 1;
            }
        }
        fired
    }

    #[test]
    fn beep_cadence_fires_ten_times_in_twelve_seconds() {
        let fired = fires_within(
            Duration::from_millis(1200),
            Duration::from_secs(12),
            Duration::from_millis(10),
        );
        assert!((9..=11).contains(&fired), "fired {fired} times");
    }

    #[test]
    fn frame_cadence_fires_at_sixty_hertz() {
        let fired = fires_within(
            Duration::from_millis(16),
            Duration::from_secs(1),
            Duration::from_millis(1),
        );
        // 1000 / 16 = 62.5 frames per second.
        assert!((61..=63).contains(&fired), "fired {fired} times");
    }

    #[test]
    fn does_not_fire_early() {
        let start = Instant::now();
        let mut cadence = Cadence::starting_at(start, Duration::from_millis(100));
        assert!(!cadence.poll(start));
        assert!(!cadence.poll(start + Duration::from_millis(99)));
        assert!(cadence.poll(start + Duration::from_millis(100)));
    }

    #[test]
    fn catches_up_after_a_stall() {
        let start = Instant::now();
        let mut cadence = Cadence::starting_at(start, Duration::from_millis(100));

        // Three periods go by while the loop was blocked.
        let late = start + Duration::from_millis(350);
        assert!(cadence.poll(late));
        assert!(cadence.poll(late));
        assert!(cadence.poll(late));
        assert!(!cadence.poll(late));
    }

    #[test]
    fn deadline_advances_by_whole_periods() {
        let start = Instant::now();
        let period = Duration::from_millis(100);
        let mut cadence = Cadence::starting_at(start, period);
        assert_eq!(cadence.next_deadline(), start + period);

        assert!(cadence.poll(start + period));
        assert_eq!(cadence.next_deadline(), start + 2 * period);
    }
}
