// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios tcsetattr SIGTSTP

//! Error taxonomy for the terminal session. See [`TermError`] for details.

use std::{borrow::Cow, io};

/// Text used when the OS gives no description for a failure.
pub const UNKNOWN_SYSTEM_ERROR: &str = "unknown system error";

/// Errors that make the current terminal session unusable.
///
/// Only environment / device failures are represented here. The other outcomes of the
/// terminal API are not errors:
///
/// | Condition                  | How it is reported                          |
/// | :------------------------- | :------------------------------------------ |
/// | Terminal unsupported       | [`Support::Unsupported`] from [`probe()`]   |
/// | Interrupted system call    | Retried internally, never visible           |
/// | End of input               | [`ReadOutcome::EndOfInput`]                 |
/// | Device / environment error | One of the variants below                   |
///
/// Every variant that wraps an [`io::Error`] names the underlying system reason in
/// its message, using [`system_reason()`].
///
/// [`ReadOutcome::EndOfInput`]: crate::ReadOutcome::EndOfInput
/// [`Support::Unsupported`]: crate::Support::Unsupported
/// [`probe()`]: crate::probe
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TermError {
    /// An operation that needs a supported terminal was called before [`probe()`]
    /// reported [`Support::Supported`].
    ///
    /// [`Support::Supported`]: crate::Support::Supported
    /// [`probe()`]: crate::probe
    #[error("terminal is not initialized or does not support line editing")]
    #[diagnostic(
        code(r3bl_line_term::unsupported),
        help(
            "Call probe() (or ue_init_term) first and only use the terminal API \
             when it reports Supported"
        )
    )]
    Unsupported,

    /// [`tcgetattr`] / [`tcsetattr`] failed while switching to raw mode.
    ///
    /// [`tcgetattr`]: rustix::termios::tcgetattr
    /// [`tcsetattr`]: rustix::termios::tcsetattr
    #[error("error entering raw mode: {}", system_reason(.0))]
    #[diagnostic(
        code(r3bl_line_term::enter_raw_mode),
        help("The terminal device rejected the raw mode settings")
    )]
    EnterRawMode(#[source] io::Error),

    /// [`tcsetattr`] failed while restoring the saved settings.
    ///
    /// [`tcsetattr`]: rustix::termios::tcsetattr
    #[error("error leaving raw mode: {}", system_reason(.0))]
    #[diagnostic(
        code(r3bl_line_term::leave_raw_mode),
        help("Run `stty sane` to restore the terminal if it is left in raw mode")
    )]
    LeaveRawMode(#[source] io::Error),

    /// Reading from the terminal failed for a reason other than interruption.
    #[error("error reading from console: {}", system_reason(.0))]
    #[diagnostic(code(r3bl_line_term::read))]
    Read(#[source] io::Error),

    /// The input bytes do not form a character in the terminal's encoding.
    #[error("invalid multibyte character sequence: {bytes:02x?}")]
    #[diagnostic(
        code(r3bl_line_term::invalid_byte_sequence),
        help(
            "Check that the locale (LC_ALL, LC_CTYPE, LANG) matches the terminal \
             encoding, or set LINE_TERM_DECODE_ERRORS=resync"
        )
    )]
    InvalidByteSequence {
        /// The bytes that were rejected, in arrival order.
        bytes: Vec<u8>,
    },

    /// The input readiness multiplexer (poll instance, signal pipe, registrations)
    /// could not be created.
    #[error("error setting up console input: {}", system_reason(.0))]
    #[diagnostic(
        code(r3bl_line_term::input_setup),
        help("This usually means the process ran out of file descriptors")
    )]
    InputSetup(#[source] io::Error),

    /// The stop signal ([`SIGTSTP`]) could not be sent to the process group.
    ///
    /// [`SIGTSTP`]: signal_hook::consts::SIGTSTP
    #[error("error suspending process: {}", system_reason(.0))]
    #[diagnostic(code(r3bl_line_term::pause))]
    Pause(#[source] io::Error),
}

/// Describes `error` for a user facing message.
///
/// Falls back to [`UNKNOWN_SYSTEM_ERROR`] when the error carries no description.
#[must_use]
pub fn system_reason(error: &io::Error) -> Cow<'static, str> {
    let it = error.to_string();
    if it.trim().is_empty() {
        Cow::Borrowed(UNKNOWN_SYSTEM_ERROR)
    } else {
        Cow::Owned(it)
    }
}
