// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words ICANON IEXTEN ISIG OPOST PARENB ICRNL

//! Verifies that raw mode sets the *correct* termios flags, not just that *something*
//! changed.

use super::current_settings;
use crate::{RawModeSwitch, TerminalMode, VMIN_RAW_MODE, VTIME_RAW_MODE,
            test_fixtures::open_pty_pair};
use pretty_assertions::assert_eq;
use rustix::termios::{ControlModes, InputModes, LocalModes, OutputModes,
                      SpecialCodeIndex};

#[test]
fn test_raw_mode_flags() {
    let pty = open_pty_pair().unwrap();
    let cooked = current_settings(&pty);
    let mut switch = RawModeSwitch::new();

    switch.enter_raw(&pty.user).unwrap();
    assert_eq!(switch.mode(), TerminalMode::Raw);

    let raw = current_settings(&pty);
    for flag in [
        LocalModes::ICANON,
        LocalModes::ECHO,
        LocalModes::ISIG,
        LocalModes::IEXTEN,
    ] {
        assert!(!raw.local_modes.contains(flag), "{flag:?} still set");
    }
    assert!(!raw.output_modes.contains(OutputModes::OPOST));
    assert!(!raw.control_modes.contains(ControlModes::PARENB));
    assert!(raw.control_modes.contains(ControlModes::CS8));
    assert_eq!(raw.special_codes[SpecialCodeIndex::VMIN], VMIN_RAW_MODE);
    assert_eq!(raw.special_codes[SpecialCodeIndex::VTIME], VTIME_RAW_MODE);

    // Input translation is left alone.
    assert_eq!(
        raw.input_modes.contains(InputModes::ICRNL),
        cooked.input_modes.contains(InputModes::ICRNL)
    );

    switch.leave_raw(&pty.user).unwrap();
}
