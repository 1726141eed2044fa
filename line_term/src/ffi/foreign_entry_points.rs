// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words nanosleep noraw

use super::terminal_restore::{install_restore_hooks, remember_cooked_settings};
use crate::{RawModeControl, ReadOutcome, ScreenSize, Support, TermConfig, TermError,
            TermSession, probe, try_initialize_logging_global};
use std::{ffi::{CString, c_char, c_int},
          sync::{Mutex, MutexGuard, Once, PoisonError}};

pub const UE_EOF: c_int = -1;
pub const UE_RESIZED: c_int = -2;
pub const UE_NO_DATA: c_int = -3;
pub const UE_ERROR: c_int = -4;

static SESSION: Mutex<Option<TermSession>> = Mutex::new(None);

/// Message of the most recent failure, handed out by [`ue_last_error()`].
static LAST_ERROR: Mutex<Option<CString>> = Mutex::new(None);

static LOGGING: Once = Once::new();

/// Screen size as seen from C. Both fields are 0 when there is no session.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UeScreenSize {
    pub rows: c_int,
    pub cols: c_int,
}

impl From<ScreenSize> for UeScreenSize {
    fn from(size: ScreenSize) -> Self {
        Self {
            rows: c_int::from(size.rows),
            cols: c_int::from(size.cols),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn record_error(error: &TermError) {
    tracing::error!(message = "foreign call failed", error = %error);
    // A message with an interior nul is cut at the nul.
    let text = error.to_string();
    let text = text.split('\0').next().unwrap_or_default();
    *lock(&LAST_ERROR) = CString::new(text).ok();
}

/// Runs `op` on the session. Without a session the error is recorded and `on_error`
/// returned, as it is when `op` fails.
fn with_session<T>(
    on_error: T,
    op: impl FnOnce(&mut TermSession) -> Result<T, TermError>,
) -> T {
    let mut guard = lock(&SESSION);
    let result = match guard.as_mut() {
        Some(session) => {
            let result = op(session);
            remember_cooked_settings(session.saved_settings());
            result
        }
        None => Err(TermError::Unsupported),
    };
    result.unwrap_or_else(|error| {
        record_error(&error);
        on_error
    })
}

fn count(n: c_int) -> usize { usize::try_from(n).unwrap_or(0) }

fn init_logging() {
    LOGGING.call_once(|| {
        let config = TermConfig::from_env();
        if let Err(report) = try_initialize_logging_global(config.tracing) {
            // Nowhere to log this to.
            drop(report);
        }
    });
}

/// Probes the terminal and opens the session. Returns 1 if the terminal is supported,
/// 0 if not. Only the first call probes, later calls give the same answer.
#[unsafe(no_mangle)]
pub extern "C" fn ue_init_term() -> c_int {
    init_logging();

    if probe() != Support::Supported {
        return 0;
    }

    let mut guard = lock(&SESSION);
    if guard.is_none() {
        match TermSession::open(TermConfig::from_env()) {
            Ok(session) => {
                remember_cooked_settings(session.saved_settings());
                *guard = Some(session);
                install_restore_hooks();
            }
            Err(error) => {
                record_error(&error);
                return 0;
            }
        }
    }
    1
}

/// Reads one character, blocking if `block` is non zero. See the table in
/// [`mod@crate::ffi`] for the return values.
#[unsafe(no_mangle)]
pub extern "C" fn ue_read_char(block: c_int) -> c_int {
    with_session(UE_ERROR, |session| {
        Ok(match session.read_char(block != 0)? {
            ReadOutcome::Char(ch) => c_int::try_from(u32::from(ch)).unwrap_or(UE_ERROR),
            ReadOutcome::EndOfInput => UE_EOF,
            ReadOutcome::Resized => UE_RESIZED,
            ReadOutcome::NoDataAvailable => UE_NO_DATA,
        })
    })
}

/// `code` that isn't a Unicode scalar value is written as `?`.
#[unsafe(no_mangle)]
pub extern "C" fn ue_write_char(code: u32) {
    let ch = char::from_u32(code).unwrap_or('?');
    with_session((), |session| {
        session.write_char(ch);
        Ok(())
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn ue_flush() {
    with_session((), |session| {
        session.flush();
        Ok(())
    });
}

#[unsafe(no_mangle)]
pub extern "C" fn ue_get_screen_size() -> UeScreenSize {
    with_session(UeScreenSize::default(), |session| {
        Ok(session.get_screen_size().into())
    })
}

/// Returns 0, or [`UE_ERROR`].
#[unsafe(no_mangle)]
pub extern "C" fn ue_raw() -> c_int {
    with_session(UE_ERROR, |session| session.enter_raw().map(|()| 0))
}

/// Returns 0, or [`UE_ERROR`].
#[unsafe(no_mangle)]
pub extern "C" fn ue_noraw() -> c_int {
    with_session(UE_ERROR, |session| session.leave_raw().map(|()| 0))
}

/// Returns 0 once the process is continued, or [`UE_ERROR`].
#[unsafe(no_mangle)]
pub extern "C" fn ue_pause() -> c_int {
    with_session(UE_ERROR, |session| session.pause().map(|()| 0))
}

#[unsafe(no_mangle)]
pub extern "C" fn ue_nanosleep(seconds: u64, nanoseconds: u64) {
    with_session((), |session| {
        session.sleep(seconds, nanoseconds);
        Ok(())
    });
}

/// Generates a fire-and-forget entry point for a session primitive.
macro_rules! session_primitive {
    ($(#[$meta:meta])* $name:ident => $method:ident) => {
        $(#[$meta])*
        #[unsafe(no_mangle)]
        pub extern "C" fn $name() {
            with_session((), |session| {
                session.$method();
                Ok(())
            });
        }
    };
    ($(#[$meta:meta])* $name:ident => $method:ident(n)) => {
        $(#[$meta])*
        #[unsafe(no_mangle)]
        pub extern "C" fn $name(n: c_int) {
            with_session((), |session| {
                session.$method(count(n));
                Ok(())
            });
        }
    };
}

session_primitive!(ue_up => up(n));
session_primitive!(ue_down => down(n));
session_primitive!(ue_left => left(n));
session_primitive!(ue_right => right(n));
session_primitive!(ue_scroll_reverse => scroll_reverse(n));
session_primitive!(ue_clr_eol => clear_eol);
session_primitive!(ue_clr_eos => clear_eos);
session_primitive!(ue_clear_screen => clear_screen);
session_primitive!(ue_bell => bell);
session_primitive!(ue_carriage_return => carriage_return);
session_primitive!(ue_line_feed => line_feed);
session_primitive!(ue_enter_am_mode => enter_am_mode);
session_primitive!(ue_exit_am_mode => exit_am_mode);

/// Message of the most recent failure, or null if nothing has failed yet. The pointer
/// stays valid until the next failure.
#[unsafe(no_mangle)]
pub extern "C" fn ue_last_error() -> *const c_char {
    lock(&LAST_ERROR)
        .as_ref()
        .map_or(std::ptr::null(), |it| it.as_ptr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use std::ffi::CStr;

    fn last_error() -> Option<String> {
        let ptr = ue_last_error();
        (!ptr.is_null())
            .then(|| unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }

    /// The test process never calls `ue_init_term()`, so every call is a contract
    /// violation.
    #[test]
    #[serial]
    fn calls_without_a_session_fail_fast() {
        assert_eq!(ue_read_char(1), UE_ERROR);
        assert_eq!(
            last_error().as_deref(),
            Some("terminal is not initialized or does not support line editing")
        );

        assert_eq!(ue_raw(), UE_ERROR);
        assert_eq!(ue_noraw(), UE_ERROR);
        assert_eq!(ue_get_screen_size(), UeScreenSize::default());

        // Fire-and-forget calls do nothing and don't panic.
        ue_up(3);
        ue_write_char(0x00e9);
        ue_write_char(0xd800);
        ue_bell();
        ue_flush();
        assert!(last_error().is_some());
    }

    #[test]
    #[serial]
    fn interior_nul_is_cut() {
        record_error(&TermError::Read(std::io::Error::other("bad\0tail")));
        assert_eq!(
            last_error().as_deref(),
            Some("error reading from console: bad")
        );
    }

    #[test]
    fn screen_size_conversion() {
        assert_eq!(
            UeScreenSize::from(ScreenSize { rows: 24, cols: 79 }),
            UeScreenSize { rows: 24, cols: 79 }
        );
    }

    #[test]
    fn negative_counts_are_zero() {
        assert_eq!(count(-1), 0);
        assert_eq!(count(5), 5);
    }
}
