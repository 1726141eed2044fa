// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words openpt grantpt unlockpt ptsname NOCTTY

use rustix::{fd::OwnedFd,
             fs::{Mode, OFlags},
             pty::{OpenptFlags, grantpt, openpt, ptsname, unlockpt},
             termios::{Winsize, tcsetwinsize}};
use std::io;

/// Rows of the window size [`open_pty_pair()`] sets.
pub const PTY_ROWS: u16 = 24;
/// Columns of the window size [`open_pty_pair()`] sets.
pub const PTY_COLS: u16 = 80;

/// Both ends of an in-process pseudo-terminal.
///
/// Unlike the [`generate_pty_test!`] setup, nothing is spawned: the test itself holds
/// the user side, which is not its controlling terminal.
///
/// [`generate_pty_test!`]: crate::generate_pty_test
#[derive(Debug)]
pub struct PtyPair {
    /// The side a terminal emulator would hold.
    pub controller: OwnedFd,
    /// The side a shell would have as stdin / stdout.
    pub user: OwnedFd,
}

/// Opens a pty pair sized [`PTY_ROWS`] x [`PTY_COLS`].
///
/// # Errors
///
/// Any failure of the pty calls.
pub fn open_pty_pair() -> io::Result<PtyPair> {
    let controller = openpt(OpenptFlags::RDWR | OpenptFlags::NOCTTY)?;
    grantpt(&controller)?;
    unlockpt(&controller)?;

    let user_path = ptsname(&controller, Vec::new())?;
    let user = rustix::fs::open(
        user_path.as_c_str(),
        OFlags::RDWR | OFlags::NOCTTY,
        Mode::empty(),
    )?;

    tcsetwinsize(
        &controller,
        Winsize {
            ws_row: PTY_ROWS,
            ws_col: PTY_COLS,
            ws_xpixel: 0,
            ws_ypixel: 0,
        },
    )?;

    Ok(PtyPair { controller, user })
}
