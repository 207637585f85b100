use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait AppEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;

    /// Block until an event arrives. `None` once the source is gone.
    fn recv(&self) -> Option<AppEvent>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // Windows reports releases too; only presses drive the timer.
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(err) => {
                    tracing::error!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AppEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Option<AppEvent> {
        self.rx.recv().ok()
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl AppEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Option<AppEvent> {
        self.rx.recv().ok()
    }
}

/// Runner that hands the application one event at a time.
///
/// At most one tick is pending. Scheduling another replaces it, so pausing
/// and resuming never leaves two tick chains alive.
pub struct Runner<E: AppEventSource> {
    event_source: E,
    next_tick: Option<Instant>,
}

impl<E: AppEventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self {
            event_source,
            next_tick: None,
        }
    }

    pub fn schedule_tick(&mut self, after: Duration) {
        self.next_tick = Some(Instant::now() + after);
    }

    #[cfg(test)]
    fn has_pending_tick(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Blocks until the next event, or returns Tick once the pending deadline
    /// passes. `None` when the source disconnected and no tick is pending.
    pub fn step(&mut self) -> Option<AppEvent> {
        let Some(deadline) = self.next_tick else {
            return self.event_source.recv();
        };

        let timeout = deadline.saturating_duration_since(Instant::now());
        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) => {
                self.next_tick = None;
                Some(AppEvent::Tick)
            }
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                self.next_tick = None;
                Some(AppEvent::Tick)
            }
        }
    }
}
