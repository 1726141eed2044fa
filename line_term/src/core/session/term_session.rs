// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words SIGTSTP nanos

use crate::{ByteSource, DecodeErrorPolicy, RawInputChannel, RawModeControl,
            RawModeTerminal, ReadOutcome, ResizeFlag, ScreenDimensions, ScreenSize,
            Support, TermConfig, TermContext, TermError, TermWriter, TerminalMode,
            TtyByteSource, probe, process_context, process_resize_flag,
            query_os_window_size};
use rustix::{fd::AsFd,
             process::{Signal, kill_current_process_group},
             termios::Termios};
use std::{io::{self, BufWriter, Stdin, Stdout, Write},
          sync::Arc,
          time::Duration};

/// Everything the line editor needs from one terminal.
///
/// | Part                | Type                  | Role                              |
/// | :------------------ | :-------------------- | :-------------------------------- |
/// | `context`           | [`TermContext`]       | capabilities, encoding, margins   |
/// | `terminal`          | [`RawModeTerminal`]   | raw / cooked mode of the device   |
/// | `input`             | [`RawInputChannel`]   | decoded reads, resize reports     |
/// | `output`            | [`TermWriter`]        | output primitives                 |
/// | `dimensions`        | [`ScreenDimensions`]  | last known good screen size       |
///
/// [`open()`](Self::open) builds the process session on stdin / stdout. Tests and
/// embedders with their own devices use [`from_parts()`](Self::from_parts).
///
/// Dropping the session flushes its output and leaves raw mode, including while
/// unwinding from a panic.
#[allow(missing_debug_implementations)]
pub struct TermSession<S: ByteSource = TtyByteSource, D: AsFd = Stdin, W: Write = BufWriter<Stdout>>
{
    context: Arc<TermContext>,
    terminal: RawModeTerminal<D>,
    input: RawInputChannel<S>,
    output: TermWriter<W>,
    dimensions: ScreenDimensions,
}

impl TermSession {
    /// Opens the session for the process terminal.
    ///
    /// # Errors
    ///
    /// - [`TermError::Unsupported`] if [`probe()`] doesn't report
    ///   [`Support::Supported`].
    /// - [`TermError::InputSetup`] if the input multiplexer can't be created.
    pub fn open(config: TermConfig) -> Result<Self, TermError> {
        if probe() != Support::Supported {
            return Err(TermError::Unsupported);
        }
        let context = process_context().ok_or(TermError::Unsupported)?;
        let source = TtyByteSource::stdin()?;

        tracing::debug!(
            message = "TermSession::open",
            term = %context.db.term_name(),
            encoding = ?context.encoding,
            margins = ?context.margins,
            decode_error_policy = %config.decode_error_policy
        );

        Ok(Self::from_parts(
            context,
            config.decode_error_policy,
            source,
            io::stdin(),
            BufWriter::new(io::stdout()),
            process_resize_flag(),
        ))
    }
}

impl<S: ByteSource, D: AsFd, W: Write> TermSession<S, D, W> {
    /// `device` is the terminal whose mode is switched and whose size is queried.
    pub fn from_parts(
        context: Arc<TermContext>,
        decode_error_policy: DecodeErrorPolicy,
        source: S,
        device: D,
        out: W,
        resize_flag: ResizeFlag,
    ) -> Self {
        Self {
            input: RawInputChannel::new(
                source,
                context.encoding,
                resize_flag,
                decode_error_policy,
            ),
            output: TermWriter::new(out, context.clone()),
            terminal: RawModeTerminal::new(device),
            dimensions: ScreenDimensions::new(),
            context,
        }
    }

    pub fn context(&self) -> &TermContext { &self.context }

    pub fn mode(&self) -> TerminalMode { self.terminal.mode() }

    /// The cooked mode settings that leaving raw mode will restore.
    pub fn saved_settings(&self) -> Option<&Termios> {
        self.terminal.switch().saved_settings()
    }

    pub fn input(&self) -> &RawInputChannel<S> { &self.input }

    pub fn output(&self) -> &TermWriter<W> { &self.output }

    /// See [`RawInputChannel::read_char()`].
    ///
    /// # Errors
    ///
    /// [`TermError::Read`] or [`TermError::InvalidByteSequence`].
    pub fn read_char(&mut self, block: bool) -> Result<ReadOutcome, TermError> {
        self.input.read_char(block)
    }

    /// Screen size from the OS, with the fallbacks of [`ScreenDimensions::resolve()`].
    pub fn get_screen_size(&mut self) -> ScreenSize {
        self.get_screen_size_with(|name| std::env::var(name).ok())
    }

    pub fn get_screen_size_with(
        &mut self,
        get_var: impl Fn(&str) -> Option<String>,
    ) -> ScreenSize {
        let os_report = query_os_window_size(self.terminal.device());
        self.dimensions.resolve(
            os_report,
            get_var,
            Some(self.context.db.as_ref()),
            self.context.margins.avoid_last_column(),
        )
    }

    pub fn write_char(&mut self, ch: char) { self.output.write_char(ch); }

    pub fn flush(&mut self) { self.output.flush(); }

    pub fn up(&mut self, n: usize) { self.output.up(n); }

    pub fn down(&mut self, n: usize) { self.output.down(n); }

    pub fn left(&mut self, n: usize) { self.output.left(n); }

    pub fn right(&mut self, n: usize) { self.output.right(n); }

    pub fn clear_eol(&mut self) { self.output.clear_eol(); }

    pub fn clear_eos(&mut self) { self.output.clear_eos(); }

    pub fn clear_screen(&mut self) { self.output.clear_screen(); }

    pub fn scroll_reverse(&mut self, n: usize) { self.output.scroll_reverse(n); }

    pub fn bell(&mut self) { self.output.bell(); }

    pub fn carriage_return(&mut self) { self.output.carriage_return(); }

    pub fn line_feed(&mut self) { self.output.line_feed(); }

    pub fn enter_am_mode(&mut self) { self.output.enter_am_mode(); }

    pub fn exit_am_mode(&mut self) { self.output.exit_am_mode(); }

    /// Suspends the process to the shell (job control stop), and picks up where it
    /// left off once continued.
    ///
    /// # Errors
    ///
    /// [`TermError::LeaveRawMode`], [`TermError::Pause`], or
    /// [`TermError::EnterRawMode`] when raw mode can't be restored on resume.
    pub fn pause(&mut self) -> Result<(), TermError> {
        self.pause_with(|| {
            kill_current_process_group(Signal::TSTP).map_err(io::Error::from)
        })
    }

    /// [`pause()`](Self::pause) with the stop signal sent by `send_stop`, which returns
    /// once the process is continued.
    ///
    /// Raw mode is entered again on resume, capturing whatever settings the shell left
    /// behind as the new cooked mode.
    ///
    /// If `send_stop` fails the process was never stopped, so raw mode is entered
    /// again before the error is returned and the session is left as it was found.
    ///
    /// # Errors
    ///
    /// See [`pause()`](Self::pause).
    pub fn pause_with(
        &mut self,
        send_stop: impl FnOnce() -> io::Result<()>,
    ) -> Result<(), TermError> {
        self.flush();
        let was_raw = self.mode() == TerminalMode::Raw;
        if was_raw {
            self.terminal.leave_raw()?;
        }

        tracing::debug!(message = "pause: stopping process group", was_raw = was_raw);
        let stopped = send_stop().map_err(TermError::Pause);
        tracing::debug!(message = "pause: stop signal returned", stopped = stopped.is_ok());

        if was_raw {
            self.terminal.enter_raw()?;
        }
        stopped
    }

    /// See [`sleep()`].
    pub fn sleep(&mut self, seconds: u64, nanoseconds: u64) {
        self.flush();
        sleep(seconds, nanoseconds);
    }
}

impl<S: ByteSource, D: AsFd, W: Write> RawModeControl for TermSession<S, D, W> {
    /// Pending output is flushed first so it is written with the old settings.
    fn enter_raw(&mut self) -> Result<(), TermError> {
        self.flush();
        self.terminal.enter_raw()
    }

    fn leave_raw(&mut self) -> Result<(), TermError> {
        self.flush();
        self.terminal.leave_raw()
    }
}

impl<S: ByteSource, D: AsFd, W: Write> Drop for TermSession<S, D, W> {
    fn drop(&mut self) {
        self.flush();
        if let Err(error) = self.terminal.leave_raw() {
            tracing::error!(
                message = "TermSession: could not restore cooked mode on drop",
                error = %error
            );
        }
    }
}

/// `seconds` plus `nanoseconds`. Nanoseconds of a second or more carry into the
/// seconds.
#[must_use]
pub fn sleep_duration(seconds: u64, nanoseconds: u64) -> Duration {
    Duration::from_secs(seconds).saturating_add(Duration::from_nanos(nanoseconds))
}

/// Blocks the calling thread for [`sleep_duration()`].
pub fn sleep(seconds: u64, nanoseconds: u64) {
    std::thread::sleep(sleep_duration(seconds, nanoseconds));
}
