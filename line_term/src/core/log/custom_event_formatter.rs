// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Custom event formatter for tracing
//!
//! [`CustomEventFormatter`] writes one plain line per event. Log files from this crate
//! are read with `tail -f` in a second terminal while the editor owns the first one, so
//! there is no color and no wrapping.
//!
//! ```text
//! <timestamp> [span] <level_sigil>: <message> key=value key=value
//! ```
//!
//! The `message` field forms the heading. Other fields are appended as `key=value`
//! pairs in the order they were recorded. Empty field values are skipped.
//!
//! ```rust
//! use tracing_subscriber::fmt::SubscriberBuilder;
//! use r3bl_line_term::CustomEventFormatter;
//!
//! let subscriber = SubscriberBuilder::default()
//!     .event_format(CustomEventFormatter)
//!     .finish();
//! # drop(subscriber);
//! ```

use chrono::Local;
use std::fmt::{self, Write as _};
use tracing::{Event, Subscriber,
              field::{Field, Visit}};
use tracing_subscriber::{fmt::{FormatEvent, FormatFields},
                         registry::LookupSpan};

/// Marker struct used to register this formatter with `tracing_subscriber`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomEventFormatter;

#[rustfmt::skip]
pub mod custom_event_formatter_constants {
    pub const LEVEL_SUFFIX: &str = ":";
    pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

    pub const ERROR_SIGIL: &str = "E";
    pub const WARN_SIGIL: &str = "W";
    pub const INFO_SIGIL: &str = "I";
    pub const DEBUG_SIGIL: &str = "D";
    pub const TRACE_SIGIL: &str = "T";
}

use custom_event_formatter_constants::{DEBUG_SIGIL, ERROR_SIGIL, INFO_SIGIL,
                                       LEVEL_SUFFIX, TIMESTAMP_FORMAT, TRACE_SIGIL,
                                       WARN_SIGIL};

#[must_use]
pub fn level_sigil(level: tracing::Level) -> &'static str {
    match level {
        tracing::Level::ERROR => ERROR_SIGIL,
        tracing::Level::WARN => WARN_SIGIL,
        tracing::Level::INFO => INFO_SIGIL,
        tracing::Level::DEBUG => DEBUG_SIGIL,
        tracing::Level::TRACE => TRACE_SIGIL,
    }
}

impl<S, N> FormatEvent<S, N> for CustomEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut f: tracing_subscriber::fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(f, "{} ", Local::now().format(TIMESTAMP_FORMAT))?;

        if let Some(scope) = ctx.lookup_current() {
            write!(f, "[{}] ", scope.name())?;
        }

        write!(f, "{}{LEVEL_SUFFIX} ", level_sigil(*event.metadata().level()))?;

        let mut fields = EventFields::default();
        event.record(&mut fields);

        f.write_str(&fields.render())?;
        writeln!(f)
    }
}

/// Collects the fields of one event. The `message` field is kept apart from the rest.
#[derive(Debug, Default)]
pub struct EventFields {
    pub message: Option<String>,
    pub pairs: Vec<(&'static str, String)>,
}

impl EventFields {
    /// `<message> key=value ...` with empty values left out.
    #[must_use]
    pub fn render(&self) -> String {
        let mut acc = self.message.clone().unwrap_or_default();
        for (name, value) in self.pairs.iter().filter(|(_, value)| !value.is_empty()) {
            if !acc.is_empty() {
                acc.push(' ');
            }
            // Writing to a String can't fail.
            let _ = write!(acc, "{name}={value}");
        }
        acc
    }

    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.pairs.push((field.name(), value));
        }
    }
}

impl Visit for EventFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }

    /// Use [`Display`](fmt::Display) for strings so quotes and newlines aren't escaped.
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }
}
