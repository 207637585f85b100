// Countdown for one session. The host delivers every tick.

use std::time::Duration;

/// Session length used when a zero duration is supplied.
pub const DEFAULT_SESSION: Duration = Duration::from_secs(25 * 60);
/// Tick length used when a zero interval is supplied.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    TimedOut,
}

/// Result of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Ignored,
    /// Time was consumed and the timer keeps running.
    Running,
    /// This tick consumed the last of the time. Reported once.
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct SessionTimer {
    total: Duration,
    interval: Duration,
    remaining: Duration,
    status: TimerStatus,
}

impl SessionTimer {
    pub fn new(total: Duration, interval: Duration) -> Self {
        let total = if total.is_zero() {
            tracing::warn!(fallback = ?DEFAULT_SESSION, "zero session length");
            DEFAULT_SESSION
        } else {
            total
        };
        let interval = if interval.is_zero() {
            tracing::warn!(fallback = ?DEFAULT_TICK, "zero tick interval");
            DEFAULT_TICK
        } else {
            interval
        };

        Self {
            total,
            interval,
            remaining: total,
            status: TimerStatus::Idle,
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Idle -> Running. Returns false when the timer was not idle.
    pub fn start(&mut self) -> bool {
        if self.status != TimerStatus::Idle {
            return false;
        }
        self.status = TimerStatus::Running;
        true
    }

    /// Running <-> Paused. Returns false when the timer is idle or timed out.
    pub fn toggle(&mut self) -> bool {
        self.status = match self.status {
            TimerStatus::Running => TimerStatus::Paused,
            TimerStatus::Paused => TimerStatus::Running,
            TimerStatus::Idle | TimerStatus::TimedOut => return false,
        };
        true
    }

    pub fn on_tick(&mut self) -> TickOutcome {
        if self.status != TimerStatus::Running {
            return TickOutcome::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(self.interval);
        if self.remaining.is_zero() {
            self.status = TimerStatus::TimedOut;
            TickOutcome::TimedOut
        } else {
            TickOutcome::Running
        }
    }

    /// Fraction of the session consumed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let total = self.total.as_secs_f64();
        let used = total - self.remaining.as_secs_f64();
        (used / total).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_timer_is_idle_and_full() {
        let timer = SessionTimer::new(ms(1000), ms(1));
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.remaining(), ms(1000));
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn test_zero_inputs_use_defaults() {
        let timer = SessionTimer::new(Duration::ZERO, Duration::ZERO);
        assert_eq!(timer.total(), DEFAULT_SESSION);
        assert_eq!(timer.interval(), DEFAULT_TICK);
        assert_eq!(timer.remaining(), DEFAULT_SESSION);
    }

    #[test]
    fn test_start_only_from_idle() {
        let mut timer = SessionTimer::new(ms(1000), ms(1));
        assert!(timer.start());
        assert!(timer.is_running());
        assert!(!timer.start());

        timer.toggle();
        assert!(!timer.start());
        assert_eq!(timer.status(), TimerStatus::Paused);
    }

    #[test]
    fn test_toggle_is_noop_when_idle_or_timed_out() {
        let mut timer = SessionTimer::new(ms(2), ms(1));
        assert!(!timer.toggle());
        assert_eq!(timer.status(), TimerStatus::Idle);

        timer.start();
        timer.on_tick();
        timer.on_tick();
        assert_eq!(timer.status(), TimerStatus::TimedOut);
        assert!(!timer.toggle());
        assert_eq!(timer.status(), TimerStatus::TimedOut);
    }

    #[test]
    fn test_ticks_consume_interval_and_track_progress() {
        let total = ms(1000);
        let interval = ms(7);
        let mut timer = SessionTimer::new(total, interval);
        timer.start();

        for k in 1..=20u32 {
            timer.on_tick();
            let expected = total.saturating_sub(interval * k);
            assert_eq!(timer.remaining(), expected);
            let expected_progress =
                (1.0 - expected.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0);
            assert!((timer.progress() - expected_progress).abs() < 1e-9);
        }
    }

    #[test]
    fn test_remaining_clamps_at_zero_and_times_out_once() {
        let mut timer = SessionTimer::new(ms(10), ms(4));
        timer.start();
        assert_eq!(timer.on_tick(), TickOutcome::Running);
        assert_eq!(timer.on_tick(), TickOutcome::Running);
        assert_eq!(timer.on_tick(), TickOutcome::TimedOut);
        assert_eq!(timer.remaining(), Duration::ZERO);
        assert_eq!(timer.progress(), 1.0);

        assert_eq!(timer.on_tick(), TickOutcome::Ignored);
        assert_eq!(timer.status(), TimerStatus::TimedOut);
    }

    #[test]
    fn test_tick_while_paused_is_ignored() {
        let mut timer = SessionTimer::new(ms(1000), ms(1));
        timer.start();
        timer.on_tick();
        timer.toggle();

        let before = timer.remaining();
        assert_eq!(timer.on_tick(), TickOutcome::Ignored);
        assert_eq!(timer.remaining(), before);
    }

    #[test]
    fn test_pause_resume_keeps_remaining() {
        let mut timer = SessionTimer::new(ms(1000), ms(1));
        timer.start();
        timer.on_tick();
        let before = timer.remaining();

        timer.toggle();
        timer.toggle();
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), before);
    }

    #[test]
    fn test_tick_while_idle_is_ignored() {
        let mut timer = SessionTimer::new(ms(1000), ms(1));
        assert_eq!(timer.on_tick(), TickOutcome::Ignored);
        assert_eq!(timer.remaining(), ms(1000));
    }
}
