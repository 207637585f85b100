// Input handling for one session: button focus, start/pause/stop, ticks.

use std::time::Duration;

use crate::hooks::{NoHooks, SessionHooks, StopAction};
use crate::timer::{SessionTimer, TickOutcome, TimerStatus};

/// Discrete events delivered to a session by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    PrimaryToggle,
    Accept,
    StopKey,
    FocusLeft,
    FocusRight,
    Quit,
    Tick,
    Resize(u16, u16),
}

/// Requests the session hands back to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Deliver `Input::Tick` after this long.
    ScheduleTick(Duration),
    /// The session ended, by timeout or by a stop that counts as completion.
    SessionComplete,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveButton {
    #[default]
    StartPause,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Running,
    Paused,
    /// The countdown ran out.
    Stopped,
}

/// Which key actions are currently offered. Quit is always available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub start: bool,
    pub pause: bool,
    pub stop: bool,
}

impl Affordances {
    fn not_started() -> Self {
        Self {
            start: true,
            pause: false,
            stop: false,
        }
    }

    fn for_running(running: bool) -> Self {
        Self {
            start: !running,
            pause: running,
            stop: true,
        }
    }

    /// `[start, pause, stop]`
    pub fn flags(&self) -> [bool; 3] {
        [self.start, self.pause, self.stop]
    }
}

/// Colour tag for a session; the view decides what it looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Red,
    Green,
}

/// Labels and accent for a session's view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStyle {
    pub start_label: String,
    pub pause_label: String,
    pub resume_label: String,
    pub stop_label: String,
    pub accent: Accent,
}

impl Default for SessionStyle {
    fn default() -> Self {
        Self {
            start_label: "Start".to_string(),
            pause_label: "Pause".to_string(),
            resume_label: "Resume".to_string(),
            stop_label: "Stop".to_string(),
            accent: Accent::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 120,
            height: 40,
        }
    }
}

pub struct SessionController {
    timer: SessionTimer,
    started: bool,
    active_button: ActiveButton,
    percent_complete: f64,
    affordances: Affordances,
    style: SessionStyle,
    viewport: Viewport,
    hooks: Box<dyn SessionHooks>,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("timer", &self.timer)
            .field("started", &self.started)
            .field("active_button", &self.active_button)
            .field("percent_complete", &self.percent_complete)
            .field("affordances", &self.affordances)
            .field("style", &self.style)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// A controller with default style and hooks that reset on stop.
    pub fn new(duration: Duration, interval: Duration) -> Self {
        Self::with_hooks(
            duration,
            interval,
            SessionStyle::default(),
            Viewport::default(),
            Box::new(NoHooks),
        )
    }

    pub fn with_hooks(
        duration: Duration,
        interval: Duration,
        style: SessionStyle,
        viewport: Viewport,
        hooks: Box<dyn SessionHooks>,
    ) -> Self {
        Self {
            timer: SessionTimer::new(duration, interval),
            started: false,
            active_button: ActiveButton::StartPause,
            percent_complete: 0.0,
            affordances: Affordances::not_started(),
            style,
            viewport,
            hooks,
        }
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn active_button(&self) -> ActiveButton {
        self.active_button
    }

    pub fn percent_complete(&self) -> f64 {
        self.percent_complete
    }

    pub fn progress(&self) -> f64 {
        self.timer.progress()
    }

    pub fn remaining(&self) -> Duration {
        self.timer.remaining()
    }

    pub fn affordances(&self) -> Affordances {
        self.affordances
    }

    pub fn style(&self) -> &SessionStyle {
        &self.style
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.started {
            return SessionPhase::NotStarted;
        }
        match self.timer.status() {
            TimerStatus::Running => SessionPhase::Running,
            TimerStatus::Paused => SessionPhase::Paused,
            TimerStatus::TimedOut => SessionPhase::Stopped,
            TimerStatus::Idle => SessionPhase::NotStarted,
        }
    }

    /// Label for the start/pause button in the current phase.
    pub fn start_pause_label(&self) -> &str {
        if !self.started {
            &self.style.start_label
        } else if !self.timer.is_running() {
            &self.style.resume_label
        } else {
            &self.style.pause_label
        }
    }

    pub fn handle(&mut self, input: Input) -> Option<Signal> {
        match input {
            Input::PrimaryToggle => self.start_pause(),
            Input::Accept => match self.active_button {
                ActiveButton::StartPause => self.start_pause(),
                ActiveButton::Stop => self.stop(),
            },
            Input::StopKey => self.stop(),
            Input::FocusLeft => {
                self.active_button = ActiveButton::StartPause;
                None
            }
            Input::FocusRight => {
                self.active_button = ActiveButton::Stop;
                None
            }
            Input::Quit => Some(Signal::Quit),
            Input::Tick => self.tick(),
            Input::Resize(width, height) => {
                self.viewport = Viewport { width, height };
                None
            }
        }
    }

    fn start_pause(&mut self) -> Option<Signal> {
        if !self.started {
            self.started = true;
            self.affordances = Affordances::for_running(true);
            self.timer.start();
            self.hooks.on_start();
            tracing::debug!(total = ?self.timer.total(), "session started");
            return Some(Signal::ScheduleTick(self.timer.interval()));
        }

        if !self.timer.toggle() {
            return None;
        }
        let running = self.timer.is_running();
        self.affordances = Affordances::for_running(running);
        tracing::debug!(running, remaining = ?self.timer.remaining(), "session toggled");
        running.then_some(Signal::ScheduleTick(self.timer.interval()))
    }

    fn stop(&mut self) -> Option<Signal> {
        match self.hooks.on_stop(self.phase()) {
            StopAction::Complete => Some(Signal::SessionComplete),
            StopAction::Reset => {
                self.reset();
                None
            }
        }
    }

    /// Swap in a brand-new controller of the same length, keeping style,
    /// viewport and hooks.
    fn reset(&mut self) {
        let hooks = std::mem::replace(&mut self.hooks, Box::new(NoHooks));
        let style = std::mem::take(&mut self.style);
        *self = Self::with_hooks(
            self.timer.total(),
            self.timer.interval(),
            style,
            self.viewport,
            hooks,
        );
        tracing::debug!("session reset");
    }

    fn tick(&mut self) -> Option<Signal> {
        let outcome = self.timer.on_tick();
        self.percent_complete = self.timer.progress();
        match outcome {
            TickOutcome::Ignored => None,
            TickOutcome::Running => Some(Signal::ScheduleTick(self.timer.interval())),
            TickOutcome::TimedOut => {
                self.hooks.on_timeout();
                Some(Signal::SessionComplete)
            }
        }
    }
}
