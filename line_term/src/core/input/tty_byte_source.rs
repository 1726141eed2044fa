// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words SIGWINCH EINTR epoll kqueue fcntl NONBLOCK

//! [`ByteSource`] for a real terminal device. See [`TtyByteSource`] for details.

use super::ByteSource;
use crate::TermError;
use mio::{Events, Interest, Poll, Token, unix::SourceFd};
use rustix::{fd::{AsFd, AsRawFd, BorrowedFd},
             fs::{OFlags, fcntl_getfl, fcntl_setfl}};
use signal_hook::consts::SIGWINCH;
use signal_hook_mio::v1_0::Signals;
use std::{collections::VecDeque,
          io::{self, ErrorKind, Stdin}};

/// Capacity of the [`mio`] events buffer. Two sources are registered.
pub const EVENTS_CAPACITY: usize = 8;

/// Read buffer size for terminal reads (`1_024` bytes).
pub const TTY_READ_BUFFER_SIZE: usize = 1_024;

/// Identifies which registered source became ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKindReady {
    /// The terminal device has data (or end of input) to read.
    Tty,
    /// The [`SIGWINCH`] self-pipe became readable.
    Signals,
    /// Unknown token - should not happen in normal operation.
    Unknown,
}

impl SourceKindReady {
    /// Registration token of this source. [`SourceKindReady::Unknown`] gets a token
    /// that is never registered.
    #[must_use]
    pub const fn to_token(self) -> Token {
        match self {
            Self::Tty => Token(0),
            Self::Signals => Token(1),
            Self::Unknown => Token(usize::MAX),
        }
    }

    #[must_use]
    pub const fn from_token(token: Token) -> Self {
        match token.0 {
            0 => Self::Tty,
            1 => Self::Signals,
            _ => Self::Unknown,
        }
    }
}

/// Reads bytes from a terminal device, waking up for `SIGWINCH` as well as input.
///
/// A blocking read waits in [`Poll::poll()`] on both the device and a
/// [`signal_hook_mio`] self-pipe. If the signal pipe fires, the read returns
/// [`ErrorKind::Interrupted`] so that [`RawInputChannel`] checks the resize flag.
/// Without the pipe a blocked `read(2)` would sleep straight through a resize when the
/// kernel restarts it.
///
/// # Buffering
///
/// Bytes are always read from the device in non-blocking mode, as many as are
/// available (up to [`TTY_READ_BUFFER_SIZE`]), and handed out one at a time. The
/// device is only waited on after it reported [`ErrorKind::WouldBlock`], which keeps
/// [`mio`]'s edge-triggered readiness accurate.
///
/// `O_NONBLOCK` is set with `fcntl` for the duration of each read and the previous
/// flags are restored right after, since the open file description is shared with
/// the shell and any other process on the terminal.
///
/// [`RawInputChannel`]: crate::RawInputChannel
/// [`Poll::poll()`]: mio::Poll::poll
#[allow(missing_debug_implementations)]
pub struct TtyByteSource<D: AsFd = Stdin> {
    device: D,
    poll: Poll,
    events: Events,
    signals: Signals,
    buffer: VecDeque<u8>,
}

impl TtyByteSource<Stdin> {
    /// Byte source for standard input.
    ///
    /// # Errors
    ///
    /// [`TermError::InputSetup`] if the poll instance or signal pipe can't be created.
    pub fn stdin() -> Result<Self, TermError> { Self::new(io::stdin()) }
}

impl<D: AsFd> TtyByteSource<D> {
    /// # Errors
    ///
    /// [`TermError::InputSetup`] if the poll instance or signal pipe can't be created,
    /// or `device` can't be registered with it.
    pub fn new(device: D) -> Result<Self, TermError> {
        let poll = Poll::new().map_err(TermError::InputSetup)?;

        let raw_fd = device.as_fd().as_raw_fd();
        poll.registry()
            .register(
                &mut SourceFd(&raw_fd),
                SourceKindReady::Tty.to_token(),
                Interest::READABLE,
            )
            .map_err(TermError::InputSetup)?;

        let mut signals = Signals::new([SIGWINCH]).map_err(TermError::InputSetup)?;
        poll.registry()
            .register(
                &mut signals,
                SourceKindReady::Signals.to_token(),
                Interest::READABLE,
            )
            .map_err(TermError::InputSetup)?;

        Ok(Self {
            device,
            poll,
            events: Events::with_capacity(EVENTS_CAPACITY),
            signals,
            buffer: VecDeque::with_capacity(TTY_READ_BUFFER_SIZE),
        })
    }

    pub fn device(&self) -> &D { &self.device }

    /// Number of bytes read from the device but not yet returned.
    #[must_use]
    pub fn buffered_len(&self) -> usize { self.buffer.len() }

    /// One non-blocking read into the buffer. `Ok(None)` is end of input.
    fn fill_buffer(&mut self) -> io::Result<Option<u8>> {
        let mut chunk = [0_u8; TTY_READ_BUFFER_SIZE];
        let count = with_nonblocking(self.device.as_fd(), |fd| {
            rustix::io::read(fd, &mut chunk[..]).map_err(io::Error::from)
        })?;

        match chunk.get(..count) {
            Some([]) | None => Ok(None),
            Some([first, rest @ ..]) => {
                self.buffer.extend(rest);
                Ok(Some(*first))
            }
        }
    }

    /// Waits until the device or the signal pipe is ready.
    fn wait(&mut self) -> io::Result<()> {
        self.poll.poll(&mut self.events, None)?;

        let mut signaled = false;
        for event in &self.events {
            match SourceKindReady::from_token(event.token()) {
                SourceKindReady::Tty => {}
                SourceKindReady::Signals => signaled = true,
                SourceKindReady::Unknown => {
                    tracing::warn!(
                        message = "tty byte source: unknown token",
                        token = ?event.token()
                    );
                }
            }
        }

        if signaled {
            // Drain the pipe so the next poll doesn't wake for the same signal.
            self.signals.pending().for_each(|_| {});
            return Err(ErrorKind::Interrupted.into());
        }
        Ok(())
    }
}

impl<D: AsFd> ByteSource for TtyByteSource<D> {
    fn read_byte(&mut self, block: bool) -> io::Result<Option<u8>> {
        if let Some(byte) = self.buffer.pop_front() {
            return Ok(Some(byte));
        }

        loop {
            match self.fill_buffer() {
                Err(e) if e.kind() == ErrorKind::WouldBlock && block => self.wait()?,
                result => return result,
            }
        }
    }
}

/// Runs `op` with `O_NONBLOCK` set on `fd`, then restores the previous file status
/// flags.
///
/// # Errors
///
/// The error of `op`, or of `fcntl` if the flags can't be read or set. A failure to
/// restore the flags is logged and never replaces the result of `op`, so bytes it
/// read are not lost.
pub fn with_nonblocking<T>(
    fd: BorrowedFd<'_>,
    op: impl FnOnce(BorrowedFd<'_>) -> io::Result<T>,
) -> io::Result<T> {
    let flags = fcntl_getfl(fd)?;
    if flags.contains(OFlags::NONBLOCK) {
        return op(fd);
    }

    fcntl_setfl(fd, flags | OFlags::NONBLOCK)?;
    let result = op(fd);
    keep_result_of_op(result, fcntl_setfl(fd, flags).map_err(io::Error::from))
}

/// Combines the result of the operation with the result of restoring the flags.
fn keep_result_of_op<T>(result: io::Result<T>, restored: io::Result<()>) -> io::Result<T> {
    if let Err(error) = restored {
        tracing::warn!(
            message = "tty byte source: could not restore file status flags",
            error = %error
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{PtyPair, open_pty_pair};
    use pretty_assertions::assert_eq;
    use rustix::{fd::OwnedFd,
                 termios::{self, OptionalActions}};

    /// Byte source on the user side of a pty, in non-canonical mode so bytes are
    /// readable without a newline.
    fn tty_source() -> (PtyPair, TtyByteSource<OwnedFd>) {
        let pty = open_pty_pair().unwrap();
        let mut settings = termios::tcgetattr(&pty.user).unwrap();
        crate::apply_raw_configuration(&mut settings);
        termios::tcsetattr(&pty.user, OptionalActions::Now, &settings).unwrap();
        let source = TtyByteSource::new(pty.user.try_clone().unwrap()).unwrap();
        (pty, source)
    }

    #[test]
    fn token_round_trip() {
        for kind in [SourceKindReady::Tty, SourceKindReady::Signals] {
            assert_eq!(SourceKindReady::from_token(kind.to_token()), kind);
        }
        assert_eq!(
            SourceKindReady::from_token(Token(42)),
            SourceKindReady::Unknown
        );
    }

    #[test]
    fn non_blocking_read_without_data_would_block() {
        let (_pty, mut source) = tty_source();
        let error = source.read_byte(false).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::WouldBlock);

        // Blocking mode restored.
        let flags = fcntl_getfl(source.device()).unwrap();
        assert!(!flags.contains(OFlags::NONBLOCK));
    }

    #[test]
    fn buffers_everything_available() {
        let (pty, mut source) = tty_source();
        rustix::io::write(&pty.controller, b"abc").unwrap();

        assert_eq!(source.read_byte(true).unwrap(), Some(b'a'));
        assert_eq!(source.buffered_len(), 2);
        assert_eq!(source.read_byte(false).unwrap(), Some(b'b'));
        assert_eq!(source.read_byte(false).unwrap(), Some(b'c'));
        assert_eq!(
            source.read_byte(false).unwrap_err().kind(),
            ErrorKind::WouldBlock
        );
    }

    #[test]
    fn blocking_read_waits_for_input() {
        let (pty, mut source) = tty_source();
        let writer = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(50));
            rustix::io::write(&pty.controller, b"z").unwrap();
            pty
        });

        assert_eq!(source.read_byte(true).unwrap(), Some(b'z'));
        drop(writer.join().unwrap());
    }

    #[test]
    fn failed_flag_restore_keeps_bytes_already_read() {
        let restored = Err(io::Error::from(ErrorKind::PermissionDenied));
        let result = keep_result_of_op(Ok(3_usize), restored);
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn failed_flag_restore_keeps_error_of_op() {
        let restored = Err(io::Error::from(ErrorKind::PermissionDenied));
        let result = keep_result_of_op::<usize>(Err(ErrorKind::WouldBlock.into()), restored);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::WouldBlock);
    }

    #[test]
    fn with_nonblocking_restores_blocking_mode() {
        let (pty, _source) = tty_source();
        let before = fcntl_getfl(&pty.user).unwrap();
        assert!(!before.contains(OFlags::NONBLOCK));

        let seen = with_nonblocking(pty.user.as_fd(), |fd| {
            fcntl_getfl(fd).map_err(io::Error::from)
        })
        .unwrap();

        assert!(seen.contains(OFlags::NONBLOCK));
        assert_eq!(fcntl_getfl(&pty.user).unwrap(), before);
    }
}
