// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words atexit noraw

//! Leaves raw mode when the host never calls `ue_noraw`: on a panic and at process
//! exit.
//!
//! Neither path can take the session lock (a panic may happen while it is held), so
//! the cooked mode settings are kept in a separate slot. [`remember_cooked_settings()`]
//! updates the slot after every foreign call that has a session.

use crate::restore_settings_now;
use rustix::{fd::AsFd, termios::Termios};
use std::{io,
          sync::{Mutex, Once, TryLockError}};

/// Settings to restore on stdin, [`Some`] only while the session is raw.
static COOKED_SETTINGS: Mutex<Option<Termios>> = Mutex::new(None);

static RESTORE_HOOKS: Once = Once::new();

pub fn remember_cooked_settings(settings: Option<&Termios>) {
    let mut slot = COOKED_SETTINGS
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *slot = settings.cloned();
}

/// Restores the remembered settings on `fd` and forgets them. Returns `true` if
/// settings were restored. Never blocks.
pub fn restore_cooked_mode_on(fd: impl AsFd) -> bool {
    let settings = match COOKED_SETTINGS.try_lock() {
        Ok(mut slot) => slot.take(),
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().take(),
        Err(TryLockError::WouldBlock) => return false,
    };
    let Some(settings) = settings else {
        return false;
    };
    match restore_settings_now(fd, &settings) {
        Ok(()) => true,
        Err(error) => {
            tracing::error!(message = "could not restore cooked mode", error = %error);
            false
        }
    }
}

extern "C" fn restore_at_exit() { restore_cooked_mode_on(io::stdin()); }

/// Installs the panic hook and the `atexit` handler, once per process. The previous
/// panic hook still runs after the terminal is restored.
pub fn install_restore_hooks() {
    RESTORE_HOOKS.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_cooked_mode_on(io::stdin());
            previous(info);
        }));

        // SAFETY: `restore_at_exit` is a plain `extern "C"` function with no arguments
        // that only touches process statics and stdin.
        if unsafe { libc::atexit(restore_at_exit) } != 0 {
            tracing::warn!(message = "could not register the atexit terminal restore");
        }
    });
}
