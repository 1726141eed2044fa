// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! In-process tests against a real pseudo-terminal pair. The raw mode switch operates
//! on the user (slave) side, exactly as it would on a login terminal.

mod test_flag_verification;
mod test_mode_pairing;

use crate::test_fixtures::PtyPair;
use rustix::termios::Termios;

/// Asserts that two termios snapshots are the same: all mode flags, both line
/// speeds, and the whole special character array.
pub(super) fn assert_same_settings(expected: &Termios, actual: &Termios) {
    pretty_assertions::assert_eq!(expected.input_modes, actual.input_modes);
    pretty_assertions::assert_eq!(expected.output_modes, actual.output_modes);
    pretty_assertions::assert_eq!(expected.control_modes, actual.control_modes);
    pretty_assertions::assert_eq!(expected.local_modes, actual.local_modes);
    pretty_assertions::assert_eq!(expected.input_speed(), actual.input_speed());
    pretty_assertions::assert_eq!(expected.output_speed(), actual.output_speed());
    // `SpecialCodes` has no `PartialEq`; its `Debug` output lists every slot of the
    // array, so comparing that compares the whole array.
    pretty_assertions::assert_eq!(
        format!("{:?}", expected.special_codes),
        format!("{:?}", actual.special_codes)
    );
}

pub(super) fn current_settings(pty: &PtyPair) -> Termios {
    rustix::termios::tcgetattr(&pty.user).unwrap()
}
