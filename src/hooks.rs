// Side-effect hooks a session calls at its transition points.

use crate::controller::SessionPhase;
use crate::mode::Mode;

/// What the controller does after `on_stop` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopAction {
    /// Replace the controller with a fresh, unstarted one of the same length.
    Reset,
    /// Treat the stop as a completed session so the cycle advances.
    Complete,
}

pub trait SessionHooks: Send {
    /// First start of the session.
    fn on_start(&mut self) {}

    /// The countdown reached zero on its own.
    fn on_timeout(&mut self) {}

    /// The user asked to stop. `phase` is the phase at the moment of the request.
    fn on_stop(&mut self, _phase: SessionPhase) -> StopAction {
        StopAction::Reset
    }
}

/// Hooks with every default: stop resets, nothing else happens.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl SessionHooks for NoHooks {}

#[derive(Debug, Default, Clone, Copy)]
pub struct FocusHooks;

impl SessionHooks for FocusHooks {
    fn on_start(&mut self) {
        tracing::info!("focus session started");
    }

    fn on_timeout(&mut self) {
        tracing::info!("focus session complete");
    }

    fn on_stop(&mut self, phase: SessionPhase) -> StopAction {
        tracing::info!(?phase, "focus session stopped, resetting");
        StopAction::Reset
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BreakHooks {
    mode: Mode,
}

impl BreakHooks {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }
}

impl SessionHooks for BreakHooks {
    fn on_start(&mut self) {
        tracing::info!(mode = %self.mode, "break started");
    }

    fn on_timeout(&mut self) {
        tracing::info!(mode = %self.mode, "break complete");
    }

    fn on_stop(&mut self, phase: SessionPhase) -> StopAction {
        tracing::info!(mode = %self.mode, ?phase, "break skipped");
        StopAction::Complete
    }
}

/// Supplies the hooks for each new session of the cycle.
pub trait HookFactory: Send {
    fn hooks_for(&mut self, mode: Mode) -> Box<dyn SessionHooks>;
}

/// Focus sessions reset on stop; breaks are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHooks;

impl HookFactory for DefaultHooks {
    fn hooks_for(&mut self, mode: Mode) -> Box<dyn SessionHooks> {
        match mode {
            Mode::Focus => Box::new(FocusHooks),
            Mode::ShortBreak | Mode::LongBreak => Box::new(BreakHooks::new(mode)),
        }
    }
}

impl<F> HookFactory for F
where
    F: FnMut(Mode) -> Box<dyn SessionHooks> + Send,
{
    fn hooks_for(&mut self, mode: Mode) -> Box<dyn SessionHooks> {
        self(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stop_action_is_reset() {
        let mut hooks = NoHooks;
        assert_eq!(hooks.on_stop(SessionPhase::Running), StopAction::Reset);
    }

    #[test]
    fn test_default_factory_per_mode() {
        let mut factory = DefaultHooks;
        let mut focus = factory.hooks_for(Mode::Focus);
        assert_eq!(focus.on_stop(SessionPhase::Running), StopAction::Reset);

        for mode in [Mode::ShortBreak, Mode::LongBreak] {
            let mut hooks = factory.hooks_for(mode);
            assert_eq!(
                hooks.on_stop(SessionPhase::NotStarted),
                StopAction::Complete
            );
        }
    }

    #[test]
    fn test_closure_factory() {
        let mut calls = Vec::new();
        {
            let mut factory = |mode: Mode| -> Box<dyn SessionHooks> {
                calls.push(mode);
                Box::new(NoHooks)
            };
            let _ = factory.hooks_for(Mode::LongBreak);
        }
        assert_eq!(calls, vec![Mode::LongBreak]);
    }
}
