// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Logging with [`tracing`].
//!
//! The terminal is the product of this crate, so nothing is ever logged to it unless
//! asked for. The default [`TracingConfig`] has [`WriterConfig::None`]. Set
//! `LINE_TERM_LOG_FILE` (and optionally `LINE_TERM_LOG_LEVEL`) to get a log file, see
//! [`TracingConfig::from_env_vars()`].

// Attach sources.
pub mod custom_event_formatter;
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use custom_event_formatter::*;
pub use rolling_file_appender_impl::*;
pub use tracing_config::*;
pub use tracing_init::*;
