// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words resync

use crate::{DecodeErrorPolicy, TracingConfig};
use std::str::FromStr;

/// `fail` or `resync`, see [`DecodeErrorPolicy`].
pub const DECODE_ERRORS_ENV_VAR: &str = "LINE_TERM_DECODE_ERRORS";

/// Settings of a [`TermSession`](crate::TermSession) that don't come from the terminal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermConfig {
    pub decode_error_policy: DecodeErrorPolicy,
    pub tracing: TracingConfig,
}

impl TermConfig {
    #[must_use]
    pub fn from_env() -> Self { Self::from_env_vars(|name| std::env::var(name).ok()) }

    /// Unparsable values are logged and replaced by their defaults.
    pub fn from_env_vars(get_var: impl Fn(&str) -> Option<String>) -> Self {
        let decode_error_policy = match get_var(DECODE_ERRORS_ENV_VAR) {
            None => DecodeErrorPolicy::default(),
            Some(value) => DecodeErrorPolicy::from_str(value.trim()).unwrap_or_else(|_| {
                tracing::warn!(
                    message = "TermConfig: ignoring unknown decode error policy",
                    value = %value
                );
                DecodeErrorPolicy::default()
            }),
        };
        Self {
            decode_error_policy,
            tracing: TracingConfig::from_env_vars(get_var),
        }
    }
}
