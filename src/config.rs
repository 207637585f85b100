use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::duration::{format_short, parse_or};
use crate::mode::{CycleConfig, Mode, DEFAULT_LONG_BREAK_EVERY};
use crate::timer::DEFAULT_TICK;

/// Persisted settings. Durations stay as the strings the user wrote so a
/// typo in the file falls back per field instead of discarding the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub focus: String,
    pub short_break: String,
    pub long_break: String,
    pub long_break_every: u32,
    pub tick: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            focus: format_short(Mode::Focus.default_duration()),
            short_break: format_short(Mode::ShortBreak.default_duration()),
            long_break: format_short(Mode::LongBreak.default_duration()),
            long_break_every: DEFAULT_LONG_BREAK_EVERY,
            tick: format_short(DEFAULT_TICK),
        }
    }
}

impl Config {
    /// Resolve into durations, substituting defaults for anything unusable.
    pub fn cycle_config(&self) -> CycleConfig {
        let long_break_every = if self.long_break_every == 0 {
            tracing::warn!(
                fallback = DEFAULT_LONG_BREAK_EVERY,
                "long_break_every must be at least 1"
            );
            DEFAULT_LONG_BREAK_EVERY
        } else {
            self.long_break_every
        };

        CycleConfig {
            focus: parse_or(&self.focus, Mode::Focus.default_duration()),
            short_break: parse_or(&self.short_break, Mode::ShortBreak.default_duration()),
            long_break: parse_or(&self.long_break, Mode::LongBreak.default_duration()),
            long_break_every,
            tick: parse_or(&self.tick, DEFAULT_TICK),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::debug!(
                    path = %self.path.display(),
                    %err,
                    "no config file, using defaults"
                );
                return Config::default();
            }
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "unreadable config, using defaults"
                );
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
