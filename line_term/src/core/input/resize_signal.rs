// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words SIGWINCH sigaction

//! The one-bit resize notification and the process `SIGWINCH` handler that sets it.

use signal_hook::{SigId, consts::SIGWINCH};
use std::{io,
          sync::{Arc, LazyLock, Mutex, PoisonError,
                 atomic::{AtomicBool, AtomicUsize, Ordering}}};

/// Pending resize notification.
///
/// Many raises before the next [`take()`] collapse into one notification. Clones
/// share the same bit.
///
/// [`take()`]: Self::take
#[derive(Debug, Clone, Default)]
pub struct ResizeFlag(Arc<AtomicBool>);

impl ResizeFlag {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn raise(&self) { self.0.store(true, Ordering::SeqCst); }

    /// Clears the flag, returning whether it was set.
    #[must_use]
    pub fn take(&self) -> bool { self.0.swap(false, Ordering::SeqCst) }

    #[must_use]
    pub fn is_pending(&self) -> bool { self.0.load(Ordering::SeqCst) }
}

/// The flag the process `SIGWINCH` handler raises.
static PROCESS_RESIZE_FLAG: LazyLock<ResizeFlag> = LazyLock::new(ResizeFlag::new);

/// Registration of the process handler. [`None`] until installed.
static PROCESS_HANDLER: Mutex<Option<SigId>> = Mutex::new(None);

static HANDLER_REGISTRATIONS: AtomicUsize = AtomicUsize::new(0);

/// Returns (a clone of) the flag that the process `SIGWINCH` handler raises.
#[must_use]
pub fn process_resize_flag() -> ResizeFlag { PROCESS_RESIZE_FLAG.clone() }

/// Installs the process `SIGWINCH` handler. Idempotent: the handler is registered on
/// the first call only.
///
/// The handler body is a single atomic store into [`process_resize_flag()`]. It does
/// not allocate, block, lock, or log.
///
/// # Errors
///
/// The `sigaction` failure, if the handler could not be registered.
pub fn install_process_resize_handler() -> io::Result<()> {
    let mut handler = PROCESS_HANDLER
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if handler.is_some() {
        return Ok(());
    }

    let id = signal_hook::flag::register(SIGWINCH, Arc::clone(&PROCESS_RESIZE_FLAG.0))?;
    HANDLER_REGISTRATIONS.fetch_add(1, Ordering::SeqCst);
    *handler = Some(id);
    Ok(())
}

/// How many times the process handler has actually been registered (0 or 1).
#[must_use]
pub fn resize_handler_registrations() -> usize {
    HANDLER_REGISTRATIONS.load(Ordering::SeqCst)
}
