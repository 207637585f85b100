// Focus, short break and long break cycling.

use std::time::Duration;

use crate::controller::{Accent, Input, SessionController, SessionStyle, Signal, Viewport};
use crate::hooks::{DefaultHooks, HookFactory};
use crate::timer::DEFAULT_TICK;

pub const DEFAULT_FOCUS: Duration = Duration::from_secs(25 * 60);
pub const DEFAULT_SHORT_BREAK: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_LONG_BREAK: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_LONG_BREAK_EVERY: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Mode {
    #[strum(serialize = "focus")]
    Focus,
    #[strum(serialize = "short break")]
    ShortBreak,
    #[strum(serialize = "long break")]
    LongBreak,
}

impl Mode {
    pub fn is_break(&self) -> bool {
        !matches!(self, Mode::Focus)
    }

    /// Length used when the configured one cannot be parsed.
    pub fn default_duration(&self) -> Duration {
        match self {
            Mode::Focus => DEFAULT_FOCUS,
            Mode::ShortBreak => DEFAULT_SHORT_BREAK,
            Mode::LongBreak => DEFAULT_LONG_BREAK,
        }
    }

    pub fn style(&self) -> SessionStyle {
        if !self.is_break() {
            return SessionStyle::default();
        }
        SessionStyle {
            stop_label: "Skip".to_string(),
            accent: Accent::Green,
            ..SessionStyle::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleConfig {
    pub focus: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
    pub long_break_every: u32,
    pub tick: Duration,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            focus: DEFAULT_FOCUS,
            short_break: DEFAULT_SHORT_BREAK,
            long_break: DEFAULT_LONG_BREAK,
            long_break_every: DEFAULT_LONG_BREAK_EVERY,
            tick: DEFAULT_TICK,
        }
    }
}

impl CycleConfig {
    pub fn duration_for(&self, mode: Mode) -> Duration {
        match mode {
            Mode::Focus => self.focus,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }
}

/// What the host needs to act on after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleSignal {
    ScheduleTick(Duration),
    Advanced { from: Mode, to: Mode },
    Quit,
}

pub struct ModeCycle {
    config: CycleConfig,
    mode: Mode,
    focus_completed: u32,
    controller: SessionController,
    hook_factory: Box<dyn HookFactory>,
}

impl std::fmt::Debug for ModeCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeCycle")
            .field("config", &self.config)
            .field("mode", &self.mode)
            .field("focus_completed", &self.focus_completed)
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

impl ModeCycle {
    pub fn new(config: CycleConfig) -> Self {
        Self::with_hook_factory(config, Viewport::default(), Box::new(DefaultHooks))
    }

    pub fn with_hook_factory(
        mut config: CycleConfig,
        viewport: Viewport,
        mut hook_factory: Box<dyn HookFactory>,
    ) -> Self {
        if config.long_break_every == 0 {
            tracing::warn!(
                fallback = DEFAULT_LONG_BREAK_EVERY,
                "long break interval must be at least 1"
            );
            config.long_break_every = DEFAULT_LONG_BREAK_EVERY;
        }
        let controller = build_controller(&config, Mode::Focus, viewport, hook_factory.as_mut());

        Self {
            config,
            mode: Mode::Focus,
            focus_completed: 0,
            controller,
            hook_factory,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn focus_completed(&self) -> u32 {
        self.focus_completed
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn handle(&mut self, input: Input) -> Option<CycleSignal> {
        match self.controller.handle(input)? {
            Signal::ScheduleTick(after) => Some(CycleSignal::ScheduleTick(after)),
            Signal::Quit => Some(CycleSignal::Quit),
            Signal::SessionComplete => {
                let from = self.mode;
                let to = self.on_complete();
                Some(CycleSignal::Advanced { from, to })
            }
        }
    }

    /// Move to the next mode and swap in a fresh controller for it.
    fn on_complete(&mut self) -> Mode {
        let next = match self.mode {
            Mode::Focus => {
                self.focus_completed += 1;
                if self.focus_completed % self.config.long_break_every == 0 {
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                }
            }
            Mode::ShortBreak | Mode::LongBreak => Mode::Focus,
        };

        tracing::info!(
            from = %self.mode,
            to = %next,
            focus_completed = self.focus_completed,
            "mode advanced"
        );

        let viewport = self.controller.viewport();
        self.mode = next;
        self.controller =
            build_controller(&self.config, next, viewport, self.hook_factory.as_mut());
        next
    }
}

fn build_controller(
    config: &CycleConfig,
    mode: Mode,
    viewport: Viewport,
    hook_factory: &mut dyn HookFactory,
) -> SessionController {
    SessionController::with_hooks(
        config.duration_for(mode),
        config.tick,
        mode.style(),
        viewport,
        hook_factory.hooks_for(mode),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SessionPhase;
    use crate::hooks::{NoHooks, SessionHooks};
    use assert_matches::assert_matches;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn fast_config() -> CycleConfig {
        CycleConfig {
            focus: ms(3),
            short_break: ms(2),
            long_break: ms(5),
            long_break_every: 4,
            tick: ms(1),
        }
    }

    /// Start the current session and tick it until it completes.
    fn run_to_completion(cycle: &mut ModeCycle) -> CycleSignal {
        cycle.handle(Input::PrimaryToggle);
        for _ in 0..1000 {
            if let Some(signal @ CycleSignal::Advanced { .. }) = cycle.handle(Input::Tick) {
                return signal;
            }
        }
        panic!("session never completed");
    }

    #[test]
    fn test_starts_in_focus() {
        let cycle = ModeCycle::new(CycleConfig::default());
        assert_eq!(cycle.mode(), Mode::Focus);
        assert_eq!(cycle.focus_completed(), 0);
        assert_eq!(cycle.controller().timer().total(), DEFAULT_FOCUS);
        assert_eq!(cycle.controller().phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn test_long_break_every_fourth_focus() {
        let mut cycle = ModeCycle::new(fast_config());
        let mut breaks = Vec::new();

        for _ in 0..5 {
            assert_eq!(cycle.mode(), Mode::Focus);
            run_to_completion(&mut cycle);
            breaks.push(cycle.mode());
            run_to_completion(&mut cycle);
        }

        assert_eq!(
            breaks,
            vec![
                Mode::ShortBreak,
                Mode::ShortBreak,
                Mode::ShortBreak,
                Mode::LongBreak,
                Mode::ShortBreak,
            ]
        );
        assert_eq!(cycle.focus_completed(), 5);
    }

    #[test]
    fn test_focus_timeout_increments_counter_once() {
        let mut cycle = ModeCycle::new(fast_config());
        let signal = run_to_completion(&mut cycle);

        assert_eq!(
            signal,
            CycleSignal::Advanced {
                from: Mode::Focus,
                to: Mode::ShortBreak
            }
        );
        assert_eq!(cycle.focus_completed(), 1);
        assert_eq!(cycle.controller().timer().total(), ms(2));
        assert!(!cycle.controller().started());
    }

    #[test]
    fn test_stray_tick_after_advance_is_ignored() {
        let mut cycle = ModeCycle::new(fast_config());
        run_to_completion(&mut cycle);

        assert_eq!(cycle.handle(Input::Tick), None);
        assert_eq!(cycle.controller().remaining(), ms(2));
    }

    #[test]
    fn test_stop_on_focus_resets_in_place() {
        let mut cycle = ModeCycle::new(fast_config());
        cycle.handle(Input::PrimaryToggle);
        cycle.handle(Input::Tick);

        assert_eq!(cycle.handle(Input::StopKey), None);
        assert_eq!(cycle.mode(), Mode::Focus);
        assert_eq!(cycle.focus_completed(), 0);
        assert!(!cycle.controller().started());
        assert_eq!(cycle.controller().remaining(), ms(3));
    }

    #[test]
    fn test_skip_break_returns_to_focus() {
        let mut cycle = ModeCycle::new(fast_config());
        run_to_completion(&mut cycle);
        assert_eq!(cycle.mode(), Mode::ShortBreak);

        let signal = cycle.handle(Input::StopKey);
        assert_eq!(
            signal,
            Some(CycleSignal::Advanced {
                from: Mode::ShortBreak,
                to: Mode::Focus
            })
        );
        assert_eq!(cycle.focus_completed(), 1);
        assert_eq!(cycle.controller().timer().total(), ms(3));
        assert!(!cycle.controller().started());
    }

    #[test]
    fn test_skip_long_break_via_accept() {
        let config = CycleConfig {
            long_break_every: 1,
            ..fast_config()
        };
        let mut cycle = ModeCycle::new(config);
        run_to_completion(&mut cycle);
        assert_eq!(cycle.mode(), Mode::LongBreak);
        assert_eq!(cycle.controller().style().stop_label, "Skip");

        cycle.handle(Input::FocusRight);
        assert_matches!(
            cycle.handle(Input::Accept),
            Some(CycleSignal::Advanced { to: Mode::Focus, .. })
        );
    }

    #[test]
    fn test_zero_long_break_every_falls_back() {
        let config = CycleConfig {
            long_break_every: 0,
            ..fast_config()
        };
        let cycle = ModeCycle::new(config);
        assert_eq!(cycle.config().long_break_every, DEFAULT_LONG_BREAK_EVERY);
    }

    #[test]
    fn test_viewport_carries_across_modes() {
        let mut cycle = ModeCycle::new(fast_config());
        cycle.handle(Input::Resize(90, 20));
        run_to_completion(&mut cycle);
        assert_eq!(
            cycle.controller().viewport(),
            Viewport {
                width: 90,
                height: 20
            }
        );
    }

    #[test]
    fn test_quit_passes_through() {
        let mut cycle = ModeCycle::new(fast_config());
        assert_eq!(cycle.handle(Input::Quit), Some(CycleSignal::Quit));
        assert_eq!(cycle.mode(), Mode::Focus);
    }

    #[test]
    fn test_hook_factory_called_per_session() {
        let mut seen = Vec::new();
        let (tx, rx) = std::sync::mpsc::channel();
        let factory = move |mode: Mode| -> Box<dyn SessionHooks> {
            let _ = tx.send(mode);
            Box::new(NoHooks)
        };
        let mut cycle =
            ModeCycle::with_hook_factory(fast_config(), Viewport::default(), Box::new(factory));
        run_to_completion(&mut cycle);
        // NoHooks resets on stop, so the break is not skipped.
        cycle.handle(Input::StopKey);
        assert_eq!(cycle.mode(), Mode::ShortBreak);

        seen.extend(rx.try_iter());
        assert_eq!(seen, vec![Mode::Focus, Mode::ShortBreak]);
    }

    #[test]
    fn test_mode_display_and_style() {
        assert_eq!(Mode::Focus.to_string(), "focus");
        assert_eq!(Mode::LongBreak.to_string(), "long break");
        assert!(Mode::ShortBreak.is_break());
        assert!(!Mode::Focus.is_break());
        assert_eq!(Mode::Focus.style().accent, Accent::Red);
        assert_eq!(Mode::ShortBreak.style().accent, Accent::Green);
        assert_eq!(Mode::LongBreak.style().stop_label, "Skip");
        assert_eq!(Mode::Focus.style().stop_label, "Stop");
        assert_eq!(Mode::LongBreak.default_duration(), DEFAULT_LONG_BREAK);
    }
}
