// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios ICANON IEXTEN ISIG OPOST PARENB stty

//! Raw / cooked transitions of the terminal line discipline.
//!
//! ## Raw Mode vs Cooked Mode
//!
//! **Cooked Mode** (initial and final state):
//! - Input is line-buffered and editable by the kernel
//! - Ctrl+C, Ctrl+Z, and friends generate signals
//! - Typed characters are echoed
//! - `\n` on output is turned into `\r\n`
//!
//! **Raw Mode** (what a line editor needs):
//! - `ISIG`, `ICANON`, `ECHO`, `IEXTEN` off
//! - `OPOST` off
//! - 8-bit characters (`CS8`), no parity
//! - `VMIN=1`, `VTIME=0`: a read returns as soon as one byte is available
//!
//! ## Pairing
//!
//! The settings in effect before the first [`RawModeSwitch::enter_raw()`] are saved
//! and restored verbatim by [`RawModeSwitch::leave_raw()`]. A second `enter_raw`
//! without a `leave_raw` in between is a no-op, so the saved snapshot is never
//! overwritten with raw settings. Use [`RawModeGuard`] to make sure cooked mode is
//! restored on every exit path, including unwinding. If the terminal is ever left in
//! raw mode anyway, `stty sane` recovers it.
//!
//! ```no_run
//! use r3bl_line_term::{RawModeGuard, RawModeTerminal};
//!
//! let mut terminal = RawModeTerminal::new(std::io::stdin());
//! {
//!     let _guard = RawModeGuard::new(&mut terminal)?;
//!     // Terminal is now in raw mode.
//! } // Cooked mode restored here.
//! # Ok::<(), r3bl_line_term::TermError>(())
//! ```

// Private modules (hide internal structure).
mod raw_mode_core;
mod raw_mode_unix;

// Re-export the public API (flat, ergonomic surface).
pub use raw_mode_core::*;
pub use raw_mode_unix::{VMIN_RAW_MODE, VTIME_RAW_MODE, apply_raw_configuration};

#[cfg(test)]
mod integration_tests;
