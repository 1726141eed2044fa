// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words SIGWINCH termios staticlib

//! # `r3bl_line_term`
//!
//! Terminal I/O binding layer for an embedded line editor. The line editing logic
//! itself lives in the managed runtime that links this crate; what lives here is the
//! platform glue it calls through a narrow foreign function boundary:
//!
//! 1. A one-time **capability gate** ([`probe()`]) that decides whether stdin and stdout
//!    are an interactive terminal with the minimum capability set.
//! 2. A **raw input channel** ([`RawInputChannel`]) that serves decoded characters,
//!    blocking or polling, and reports terminal resizes ([`SIGWINCH`]) before any
//!    buffered input.
//! 3. **Raw / cooked mode** transitions ([`RawModeSwitch`], [`RawModeGuard`]) that
//!    restore the original line discipline bit-for-bit.
//! 4. Fire-and-forget **output primitives** ([`TermWriter`]): cursor movement, clearing,
//!    reverse scroll, bell, automatic margin handling, and character encoding.
//! 5. **Screen size** resolution ([`ScreenDimensions`]) with OS, cache, environment,
//!    database, and hard-coded fallbacks.
//!
//! All of these are tied together by one explicit session object, [`TermSession`], and
//! exported as `extern "C"` functions in [`mod@ffi`].
//!
//! ```no_run
//! use r3bl_line_term::{RawModeControl, ReadOutcome, Support, TermConfig, TermSession,
//!                      probe};
//!
//! if probe() == Support::Supported {
//!     let mut session = TermSession::open(TermConfig::from_env()).unwrap();
//!     session.enter_raw().unwrap();
//!     loop {
//!         match session.read_char(true).unwrap() {
//!             ReadOutcome::Char('q') | ReadOutcome::EndOfInput => break,
//!             ReadOutcome::Char(ch) => session.write_char(ch),
//!             ReadOutcome::Resized => {
//!                 let size = session.get_screen_size();
//!                 println!("{size:?}");
//!             }
//!             ReadOutcome::NoDataAvailable => {}
//!         }
//!         session.flush();
//!     }
//!     session.leave_raw().unwrap();
//! }
//! ```
//!
//! This crate is Unix only.
//!
//! [`SIGWINCH`]: signal_hook::consts::SIGWINCH

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod ffi;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
pub use core::*;
