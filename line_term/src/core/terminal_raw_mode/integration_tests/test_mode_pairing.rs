// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{assert_same_settings, current_settings};
use crate::{RawModeControl, RawModeGuard, RawModeSwitch, RawModeTerminal,
            TerminalMode, test_fixtures::open_pty_pair};
use pretty_assertions::assert_eq;
use rustix::termios::LocalModes;

#[test]
fn test_leave_restores_original_settings() {
    let pty = open_pty_pair().unwrap();
    let before = current_settings(&pty);
    let mut switch = RawModeSwitch::new();

    switch.enter_raw(&pty.user).unwrap();
    assert_same_settings(&before, switch.saved_settings().unwrap());
    switch.leave_raw(&pty.user).unwrap();

    assert_eq!(switch.mode(), TerminalMode::Cooked);
    assert!(switch.saved_settings().is_none());
    assert_same_settings(&before, &current_settings(&pty));
}

#[test]
fn test_second_enter_keeps_original_snapshot() {
    let pty = open_pty_pair().unwrap();
    let before = current_settings(&pty);
    let mut switch = RawModeSwitch::new();

    switch.enter_raw(&pty.user).unwrap();
    switch.enter_raw(&pty.user).unwrap();
    assert_same_settings(&before, switch.saved_settings().unwrap());

    switch.leave_raw(&pty.user).unwrap();
    assert_same_settings(&before, &current_settings(&pty));
}

#[test]
fn test_leave_without_enter_is_noop() {
    let pty = open_pty_pair().unwrap();
    let before = current_settings(&pty);
    let mut switch = RawModeSwitch::new();

    switch.leave_raw(&pty.user).unwrap();
    assert_eq!(switch.mode(), TerminalMode::Cooked);
    assert_same_settings(&before, &current_settings(&pty));
}

#[test]
fn test_multiple_cycles() {
    let pty = open_pty_pair().unwrap();
    let before = current_settings(&pty);
    let mut switch = RawModeSwitch::new();

    for _ in 0..3 {
        switch.enter_raw(&pty.user).unwrap();
        assert!(!current_settings(&pty).local_modes.contains(LocalModes::ICANON));
        switch.leave_raw(&pty.user).unwrap();
        assert_same_settings(&before, &current_settings(&pty));
    }
}

#[test]
fn test_guard_restores_on_drop() {
    let pty = open_pty_pair().unwrap();
    let before = current_settings(&pty);
    let mut terminal = RawModeTerminal::new(pty.user.try_clone().unwrap());

    {
        let guard = RawModeGuard::new(&mut terminal).unwrap();
        assert_eq!(guard.mode(), TerminalMode::Raw);
        assert!(!current_settings(&pty).local_modes.contains(LocalModes::ECHO));
    }

    assert_eq!(terminal.mode(), TerminalMode::Cooked);
    assert_same_settings(&before, &current_settings(&pty));
}

#[test]
fn test_guard_restores_on_panic() {
    let pty = open_pty_pair().unwrap();
    let before = current_settings(&pty);
    let mut terminal = RawModeTerminal::new(pty.user.try_clone().unwrap());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = RawModeGuard::new(&mut terminal).unwrap();
        panic!("unwinding through the guard");
    }));

    assert!(result.is_err());
    assert_same_settings(&before, &current_settings(&pty));
    assert!(terminal.leave_raw().is_ok());
}

#[test]
fn test_customized_special_characters_are_restored() {
    use rustix::termios::{OptionalActions, SpecialCodeIndex, tcsetattr};

    let pty = open_pty_pair().unwrap();
    let mut custom = current_settings(&pty);
    custom.special_codes[SpecialCodeIndex::VERASE] = 0x08;
    custom.special_codes[SpecialCodeIndex::VKILL] = 0x0b;
    custom.special_codes[SpecialCodeIndex::VWERASE] = 0x0c;
    custom.special_codes[SpecialCodeIndex::VMIN] = 4;
    custom.special_codes[SpecialCodeIndex::VTIME] = 2;
    tcsetattr(&pty.user, OptionalActions::Now, &custom).unwrap();
    let before = current_settings(&pty);

    let mut switch = RawModeSwitch::new();
    switch.enter_raw(&pty.user).unwrap();
    switch.leave_raw(&pty.user).unwrap();

    assert_same_settings(&before, &current_settings(&pty));
    assert_eq!(
        current_settings(&pty).special_codes[SpecialCodeIndex::VKILL],
        0x0b
    );
}

#[test]
fn test_restore_settings_now_puts_snapshot_back() {
    let pty = open_pty_pair().unwrap();
    let before = current_settings(&pty);
    let mut switch = RawModeSwitch::new();
    switch.enter_raw(&pty.user).unwrap();
    let snapshot = switch.saved_settings().cloned().unwrap();

    crate::restore_settings_now(&pty.user, &snapshot).unwrap();

    assert_same_settings(&before, &current_settings(&pty));
}
