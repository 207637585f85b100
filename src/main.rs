mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use tomato::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    controller::{Input, Viewport},
    hooks::DefaultHooks,
    input::input_for_key,
    logging,
    mode::{CycleSignal, ModeCycle},
    runtime::{AppEvent, AppEventSource, CrosstermEventSource, Runner},
};

/// pomodoro timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A pomodoro timer for the terminal. Alternates focus sessions with short breaks, and every few focus sessions with a long break. Durations are written as <number><unit>, e.g. 25m, 1h30m or 90s."
)]
pub struct Cli {
    /// length of a focus session, e.g. 25m
    #[clap(short = 'f', long)]
    focus: Option<String>,

    /// length of a short break, e.g. 5m
    #[clap(short = 's', long)]
    short_break: Option<String>,

    /// length of a long break, e.g. 15m
    #[clap(short = 'l', long)]
    long_break: Option<String>,

    /// number of focus sessions per long break
    #[clap(short = 'L', long)]
    long_break_every: Option<u32>,

    /// how often the countdown advances, e.g. 1s
    #[clap(short = 't', long)]
    tick: Option<String>,

    /// save these settings as the defaults for future runs
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Overlay the flags that were given on top of `cfg`.
    fn merge_into(&self, mut cfg: Config) -> Config {
        if let Some(focus) = &self.focus {
            cfg.focus = focus.clone();
        }
        if let Some(short_break) = &self.short_break {
            cfg.short_break = short_break.clone();
        }
        if let Some(long_break) = &self.long_break {
            cfg.long_break = long_break.clone();
        }
        if let Some(every) = self.long_break_every {
            cfg.long_break_every = every;
        }
        if let Some(tick) = &self.tick {
            cfg.tick = tick.clone();
        }
        cfg
    }
}

#[derive(Debug)]
pub struct App {
    pub cycle: ModeCycle,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            cycle: ModeCycle::with_hook_factory(
                config.cycle_config(),
                Viewport::default(),
                Box::new(DefaultHooks),
            ),
        }
    }

    /// Feed one host event to the cycle.
    pub fn on_event(&mut self, event: AppEvent) -> Option<CycleSignal> {
        let input = match event {
            AppEvent::Key(key) => input_for_key(key)?,
            AppEvent::Resize(width, height) => Input::Resize(width, height),
            AppEvent::Tick => Input::Tick,
        };
        self.cycle.handle(input)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    logging::init(AppDirs::log_path().as_deref());

    let store = FileConfigStore::new();
    let config = cli.merge_into(store.load());
    if cli.save_config {
        store.save(&config)?;
        tracing::info!(path = %store.path().display(), "saved config");
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let size = terminal.size().unwrap_or_default();
    app.on_event(AppEvent::Resize(size.width, size.height));

    let mut runner = Runner::new(CrosstermEventSource::new());
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: AppEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E>,
) -> Result<(), Box<dyn Error>> {
    tracing::info!(config = ?app.cycle.config(), "starting");

    loop {
        terminal.draw(|f| ui(app, f))?;

        let Some(event) = runner.step() else {
            break;
        };

        match app.on_event(event) {
            Some(CycleSignal::ScheduleTick(after)) => runner.schedule_tick(after),
            Some(CycleSignal::Quit) => break,
            Some(CycleSignal::Advanced { .. }) | None => {}
        }
    }

    tracing::info!(focus_completed = app.cycle.focus_completed(), "exiting");
    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
