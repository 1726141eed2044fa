// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words isatty SIGWINCH smam rmam xenl

//! One-time probe of whether the process can do line editing on its terminal.
//!
//! # State machine
//!
//! ```text
//!              probe()
//!  Unknown ──────────────┬──► Supported   (cached until process exit)
//!                        └──► Unsupported (cached until process exit)
//! ```
//!
//! The transition happens exactly once per [`CapabilityGate`]. The process-wide gate
//! behind [`probe()`] is a `static`, so every caller in the process observes the same
//! answer, and the side effects of a successful probe (installing the `SIGWINCH`
//! handler, establishing the [`TermEncoding`]) happen at most once.
//!
//! An unsupported terminal is not an error. Callers check the [`Support`] value and
//! only then use the rest of the API. Anything that needs a supported terminal
//! without one fails fast with [`TermError::Unsupported`].
//!
//! [`TermError::Unsupported`]: crate::TermError::Unsupported

use super::{AnsiCapabilityDb, BoolCap, CapabilityDb, REQUIRED_CAPS, StringCap,
            TERM_ENV_VAR, TerminfoCapabilityDb};
use crate::{TermEncoding, install_process_resize_handler};
use std::{io,
          sync::{Arc, OnceLock}};

/// Process-wide terminal state. See the [module docs] for the transitions.
///
/// [module docs]: self
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    Unknown,
    Unsupported,
    Supported,
}

/// Answer of [`probe()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    Unsupported,
    Supported,
}

/// How the terminal's automatic right margin is handled.
///
/// Writing to the last column of a terminal with automatic margins (`am`) wraps the
/// cursor, and `xenl` terminals then swallow the next newline. A line editor needs
/// the cursor to stay where it expects, so:
///
/// | Terminal                        | Policy                | `get_screen_size` | am mode calls      |
/// | :------------------------------ | :-------------------- | :---------------- | :----------------- |
/// | no `am`                         | [`Normal`]            | as reported       | nothing            |
/// | `am`, has `smam` and `rmam`     | [`DisableAutoMargin`] | as reported       | `rmam` / `smam`    |
/// | `am`, no way to turn it off     | [`AvoidLastColumn`]   | one column fewer  | `cub1 cuf1` (xenl) |
///
/// [`Normal`]: MarginPolicy::Normal
/// [`DisableAutoMargin`]: MarginPolicy::DisableAutoMargin
/// [`AvoidLastColumn`]: MarginPolicy::AvoidLastColumn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginPolicy {
    Normal,
    DisableAutoMargin,
    AvoidLastColumn { eat_newline_glitch: bool },
}

impl MarginPolicy {
    #[must_use]
    pub fn from_db(db: &dyn CapabilityDb) -> Self {
        if !db.flag(BoolCap::AutoRightMargin) {
            return Self::Normal;
        }
        if db.has_all(&[StringCap::EnterAmMode, StringCap::ExitAmMode]) {
            Self::DisableAutoMargin
        } else {
            Self::AvoidLastColumn {
                eat_newline_glitch: db.flag(BoolCap::EatNewlineGlitch),
            }
        }
    }

    /// Returns `true` if the rightmost column must be left unused.
    #[must_use]
    pub fn avoid_last_column(&self) -> bool {
        matches!(self, Self::AvoidLastColumn { .. })
    }
}

/// Everything a successful probe establishes for the rest of the session.
#[derive(Debug, Clone)]
pub struct TermContext {
    pub db: Arc<dyn CapabilityDb>,
    pub encoding: TermEncoding,
    pub margins: MarginPolicy,
}

impl TermContext {
    #[must_use]
    pub fn new(db: Arc<dyn CapabilityDb>, encoding: TermEncoding) -> Self {
        let margins = MarginPolicy::from_db(db.as_ref());
        Self {
            db,
            encoding,
            margins,
        }
    }
}

/// Loads the capability database for `term_name`: the installed `terminfo` entry, or
/// the built-in [`AnsiCapabilityDb`] table when there is none.
#[must_use]
pub fn load_capability_db(term_name: &str) -> Option<Arc<dyn CapabilityDb>> {
    if let Some(db) = TerminfoCapabilityDb::from_term_name(term_name) {
        return Some(Arc::new(db));
    }
    let db = AnsiCapabilityDb::from_term_name(term_name)?;
    tracing::debug!(
        message = "using built-in ANSI capabilities",
        term = term_name
    );
    Some(Arc::new(db))
}

/// Facts about the process environment that decide the probe.
#[derive(Debug, Clone)]
pub struct ProbeEnvironment {
    pub stdin_is_tty: bool,
    pub stdout_is_tty: bool,
    /// [`None`] if the capability database lookup failed.
    pub db: Option<Arc<dyn CapabilityDb>>,
    pub encoding: TermEncoding,
}

impl ProbeEnvironment {
    /// Inspects the real standard streams, `TERM`, and the locale variables.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            stdin_is_tty: rustix::termios::isatty(io::stdin()),
            stdout_is_tty: rustix::termios::isatty(io::stdout()),
            db: std::env::var(TERM_ENV_VAR)
                .ok()
                .and_then(|term| load_capability_db(&term)),
            encoding: TermEncoding::from_env(),
        }
    }

    /// Applies the support rules. Has no side effects.
    #[must_use]
    pub fn evaluate(self) -> Option<TermContext> {
        if !(self.stdin_is_tty && self.stdout_is_tty) {
            tracing::debug!(
                message = "probe: standard streams are not both terminals",
                stdin_is_tty = self.stdin_is_tty,
                stdout_is_tty = self.stdout_is_tty
            );
            return None;
        }

        let Some(db) = self.db else {
            tracing::debug!(message = "probe: capability database lookup failed");
            return None;
        };

        if let Some(missing) = REQUIRED_CAPS.iter().find(|cap| db.string(**cap).is_none())
        {
            tracing::debug!(
                message = "probe: required capability missing",
                term = db.term_name(),
                capability = %missing
            );
            return None;
        }

        Some(TermContext::new(db, self.encoding))
    }
}

/// Memoized capability probe. See the [module docs] for details.
///
/// [module docs]: self
#[derive(Debug, Default)]
pub struct CapabilityGate {
    outcome: OnceLock<Option<Arc<TermContext>>>,
}

impl CapabilityGate {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outcome: OnceLock::new(),
        }
    }

    /// Runs the probe on the first call and returns the cached answer on every call
    /// after that. Neither `get_env` nor `install_resize_handler` is called again once
    /// an answer exists.
    ///
    /// `install_resize_handler` only runs when the terminal is otherwise supported. If
    /// it fails, the answer is [`Support::Unsupported`] since resize notifications
    /// could never be delivered.
    pub fn probe_with(
        &self,
        get_env: impl FnOnce() -> ProbeEnvironment,
        install_resize_handler: impl FnOnce() -> io::Result<()>,
    ) -> Support {
        let outcome = self.outcome.get_or_init(|| {
            let context = get_env().evaluate()?;
            if let Err(error) = install_resize_handler() {
                tracing::warn!(
                    message = "probe: could not install resize handler",
                    error = %error
                );
                return None;
            }
            tracing::debug!(
                message = "probe: terminal supported",
                term = context.db.term_name(),
                encoding = ?context.encoding,
                margins = ?context.margins
            );
            Some(Arc::new(context))
        });

        match outcome {
            Some(_) => Support::Supported,
            None => Support::Unsupported,
        }
    }

    #[must_use]
    pub fn state(&self) -> TerminalState {
        match self.outcome.get() {
            None => TerminalState::Unknown,
            Some(None) => TerminalState::Unsupported,
            Some(Some(_)) => TerminalState::Supported,
        }
    }

    /// The context established by a [`Support::Supported`] probe.
    #[must_use]
    pub fn context(&self) -> Option<Arc<TermContext>> {
        self.outcome.get().and_then(Clone::clone)
    }
}

static PROCESS_GATE: CapabilityGate = CapabilityGate::new();

/// Probes the process's terminal. Idempotent, memoized for the process lifetime.
///
/// `Unsupported` if standard input or standard output is not a terminal, if there is no
/// capability database entry for `TERM`, or if any of [`REQUIRED_CAPS`] is missing. On
/// `Supported` the `SIGWINCH` handler is installed and the [`TermEncoding`] is fixed.
pub fn probe() -> Support {
    PROCESS_GATE.probe_with(
        ProbeEnvironment::from_process,
        install_process_resize_handler,
    )
}

#[must_use]
pub fn terminal_state() -> TerminalState { PROCESS_GATE.state() }

/// The context of the process-wide probe, if it answered [`Support::Supported`].
#[must_use]
pub fn process_context() -> Option<Arc<TermContext>> { PROCESS_GATE.context() }
