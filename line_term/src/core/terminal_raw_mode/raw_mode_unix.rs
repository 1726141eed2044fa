// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words termios tcgetattr tcsetattr ICANON IEXTEN ISIG OPOST PARENB VMIN VTIME

//! Unix implementation of the line discipline calls using rustix's safe termios API.

use rustix::{fd::AsFd,
             io::Errno,
             termios::{self, ControlModes, LocalModes, OptionalActions, OutputModes,
                       SpecialCodeIndex, Termios}};
use std::io;

/// Minimum number of bytes for a raw mode read to return.
pub const VMIN_RAW_MODE: u8 = 1;

/// Raw mode read timeout (tenths of a second). Zero means wait indefinitely for
/// [`VMIN_RAW_MODE`] bytes.
pub const VTIME_RAW_MODE: u8 = 0;

/// Turns `termios` into the raw configuration described in the [module docs].
///
/// Only the listed flags change. In particular input flags (`ICRNL`, `IXON`) are left
/// as the user had them.
///
/// [module docs]: super
pub fn apply_raw_configuration(termios: &mut Termios) {
    termios.local_modes.remove(
        LocalModes::ISIG | LocalModes::ICANON | LocalModes::ECHO | LocalModes::IEXTEN,
    );
    termios.output_modes.remove(OutputModes::OPOST);
    termios
        .control_modes
        .remove(ControlModes::CSIZE | ControlModes::PARENB);
    termios.control_modes.insert(ControlModes::CS8);
    termios.special_codes[SpecialCodeIndex::VMIN] = VMIN_RAW_MODE;
    termios.special_codes[SpecialCodeIndex::VTIME] = VTIME_RAW_MODE;
}

pub(super) fn get_settings(fd: impl AsFd) -> io::Result<Termios> {
    retry_on_interrupt(|| termios::tcgetattr(&fd))
}

/// Applies `settings` once pending output has been written, so that text emitted
/// under the old settings is not reinterpreted by the new ones.
pub(super) fn set_settings(fd: impl AsFd, settings: &Termios) -> io::Result<()> {
    retry_on_interrupt(|| termios::tcsetattr(&fd, OptionalActions::Drain, settings))
}

/// Applies `settings` immediately, without waiting for pending output.
pub(super) fn set_settings_now(fd: impl AsFd, settings: &Termios) -> io::Result<()> {
    retry_on_interrupt(|| termios::tcsetattr(&fd, OptionalActions::Now, settings))
}

fn retry_on_interrupt<T>(mut op: impl FnMut() -> rustix::io::Result<T>) -> io::Result<T> {
    loop {
        match op() {
            Err(Errno::INTR) => {}
            result => return result.map_err(io::Error::from),
        }
    }
}
