// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words smam rmam xenl

//! Output primitives of the line editor. See [`TermWriter`] for details.

use crate::{MarginPolicy, StringCap, TermContext};
use std::{io::Write, sync::Arc};

/// Byte written by [`TermWriter::line_feed()`].
pub const LINE_FEED: &[u8] = b"\n";

/// Byte written by [`TermWriter::bell()`] when the terminal has no `bel` capability.
pub const FALLBACK_BELL: &[u8] = b"\x07";

/// Writes capability strings and characters to the terminal.
///
/// Every primitive is fire-and-forget: write errors are logged at debug level and
/// otherwise ignored. A terminal that can no longer be written to shows up as a read
/// error or end of input on the input side.
///
/// Output is only as buffered as `W` is. Call [`flush()`](Self::flush) before
/// anything where timing relative to the terminal matters (mode switches, suspend).
#[derive(Debug)]
pub struct TermWriter<W: Write> {
    out: W,
    context: Arc<TermContext>,
}

impl<W: Write> TermWriter<W> {
    pub fn new(out: W, context: Arc<TermContext>) -> Self { Self { out, context } }

    pub fn get_ref(&self) -> &W { &self.out }

    pub fn get_mut(&mut self) -> &mut W { &mut self.out }

    pub fn into_inner(self) -> W { self.out }

    pub fn context(&self) -> &TermContext { &self.context }

    /// Writes the capability string for `cap` `repeat` times. Nothing is written if the
    /// terminal lacks the capability.
    pub fn emit(&mut self, cap: StringCap, repeat: usize) {
        let Some(bytes) = self.context.db.string(cap) else {
            tracing::debug!(
                message = "emit: capability not available",
                capability = %cap
            );
            return;
        };
        for _ in 0..repeat {
            if let Err(error) = self.out.write_all(bytes) {
                tracing::debug!(
                    message = "emit: write failed",
                    capability = %cap,
                    error = %error
                );
                return;
            }
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        if let Err(error) = self.out.write_all(bytes) {
            tracing::debug!(message = "write failed", error = %error);
        }
    }

    pub fn up(&mut self, n: usize) { self.emit(StringCap::CursorUp, n); }

    pub fn down(&mut self, n: usize) { self.emit(StringCap::CursorDown, n); }

    pub fn left(&mut self, n: usize) { self.emit(StringCap::CursorLeft, n); }

    pub fn right(&mut self, n: usize) { self.emit(StringCap::CursorRight, n); }

    pub fn clear_eol(&mut self) { self.emit(StringCap::ClrEol, 1); }

    pub fn clear_eos(&mut self) { self.emit(StringCap::ClrEos, 1); }

    pub fn clear_screen(&mut self) { self.emit(StringCap::ClearScreen, 1); }

    /// Scrolls the text down `n` lines. Each step also clears the line it reveals,
    /// since some terminals only scroll part of the screen.
    pub fn scroll_reverse(&mut self, n: usize) {
        for _ in 0..n {
            self.emit(StringCap::ScrollReverse, 1);
            self.emit(StringCap::ClrEol, 1);
        }
    }

    pub fn bell(&mut self) {
        if self.context.db.string(StringCap::Bell).is_some() {
            self.emit(StringCap::Bell, 1);
        } else {
            self.write_bytes(FALLBACK_BELL);
        }
    }

    pub fn carriage_return(&mut self) { self.emit(StringCap::CarriageReturn, 1); }

    pub fn line_feed(&mut self) { self.write_bytes(LINE_FEED); }

    /// Enters automatic margin suppression before the editor draws: margins are turned
    /// off (`rmam`) and the output is flushed so that happens before any drawing. See
    /// [`MarginPolicy`].
    pub fn enter_am_mode(&mut self) {
        match self.context.margins {
            MarginPolicy::DisableAutoMargin => {
                self.emit(StringCap::ExitAmMode, 1);
                self.flush();
            }
            MarginPolicy::AvoidLastColumn {
                eat_newline_glitch: true,
            } => self.compensate_last_column(),
            MarginPolicy::Normal
            | MarginPolicy::AvoidLastColumn {
                eat_newline_glitch: false,
            } => {}
        }
    }

    /// Leaves automatic margin suppression: margins are turned back on (`smam`) for
    /// whatever runs on the terminal next. See [`MarginPolicy`].
    pub fn exit_am_mode(&mut self) {
        match self.context.margins {
            MarginPolicy::DisableAutoMargin => self.emit(StringCap::EnterAmMode, 1),
            MarginPolicy::AvoidLastColumn {
                eat_newline_glitch: true,
            } => self.compensate_last_column(),
            MarginPolicy::Normal
            | MarginPolicy::AvoidLastColumn {
                eat_newline_glitch: false,
            } => {}
        }
    }

    /// Moving left then right settles a cursor parked past the last column, which
    /// defeats the eat newline glitch.
    fn compensate_last_column(&mut self) {
        self.emit(StringCap::CursorLeft, 1);
        self.emit(StringCap::CursorRight, 1);
    }

    /// Writes `ch` in the terminal's encoding, or `?` if it has no encoding.
    pub fn write_char(&mut self, ch: char) {
        let encoded = self.context.encoding.encode_or_placeholder(ch);
        self.write_bytes(&encoded);
    }

    pub fn flush(&mut self) {
        if let Err(error) = self.out.flush() {
            tracing::debug!(message = "flush failed", error = %error);
        }
    }
}
