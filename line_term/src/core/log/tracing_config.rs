// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{path::PathBuf, str::FromStr};
use tracing_core::LevelFilter;

/// Path of the log file. Logging is off when unset.
pub const LOG_FILE_ENV_VAR: &str = "LINE_TERM_LOG_FILE";

/// Level filter (`error`, `warn`, `info`, `debug`, `trace`, `off`). Defaults to
/// `debug`.
pub const LOG_LEVEL_ENV_VAR: &str = "LINE_TERM_LOG_LEVEL";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// Logging to the display of the terminal being edited garbles the screen. It is meant
/// for tests and for hosts that redirect stderr.
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(PathBuf),
    DisplayAndFile(DisplayPreference, PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            writer_config: WriterConfig::None,
            level_filter: LevelFilter::DEBUG,
        }
    }
}

impl TracingConfig {
    pub fn new_file(path: impl Into<PathBuf>) -> Self {
        Self {
            writer_config: WriterConfig::File(path.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn from_env() -> Self { Self::from_env_vars(|name| std::env::var(name).ok()) }

    /// Reads [`LOG_FILE_ENV_VAR`] and [`LOG_LEVEL_ENV_VAR`] through `get_var`. An
    /// unparsable level keeps the default.
    pub fn from_env_vars(get_var: impl Fn(&str) -> Option<String>) -> Self {
        let writer_config = get_var(LOG_FILE_ENV_VAR)
            .filter(|it| !it.is_empty())
            .map_or(WriterConfig::None, |path| WriterConfig::File(path.into()));
        let level_filter = get_var(LOG_LEVEL_ENV_VAR)
            .and_then(|it| LevelFilter::from_str(it.trim()).ok())
            .unwrap_or(LevelFilter::DEBUG);
        Self {
            writer_config,
            level_filter,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.writer_config != WriterConfig::None && self.level_filter != LevelFilter::OFF
    }
}
