// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Core raw mode state and the RAII guard.
//!
//! This module provides:
//! - [`RawModeSwitch`], which owns the saved cooked mode settings
//! - [`RawModeTerminal`], a switch bound to a terminal device
//! - The [`RawModeGuard`] RAII wrapper for automatic restoration

use super::raw_mode_unix::{apply_raw_configuration, get_settings, set_settings,
                            set_settings_now};
use crate::TermError;
use rustix::{fd::AsFd, termios::Termios};
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalMode {
    Cooked,
    Raw,
}

/// Raw / cooked state machine for one terminal device.
///
/// Holds the settings captured by the first [`enter_raw()`] until the matching
/// [`leave_raw()`]. Holding a snapshot is what "raw mode" means here, so
/// [`mode()`] never disagrees with the saved settings.
///
/// [`enter_raw()`]: Self::enter_raw
/// [`leave_raw()`]: Self::leave_raw
/// [`mode()`]: Self::mode
#[derive(Debug, Default)]
pub struct RawModeSwitch {
    saved: Option<Termios>,
}

impl RawModeSwitch {
    #[must_use]
    pub const fn new() -> Self { Self { saved: None } }

    #[must_use]
    pub fn mode(&self) -> TerminalMode {
        match self.saved {
            Some(_) => TerminalMode::Raw,
            None => TerminalMode::Cooked,
        }
    }

    /// The cooked mode settings that [`leave_raw()`](Self::leave_raw) will restore.
    #[must_use]
    pub fn saved_settings(&self) -> Option<&Termios> { self.saved.as_ref() }

    /// Cooked → Raw. A no-op when already raw.
    ///
    /// # Errors
    ///
    /// [`TermError::EnterRawMode`] if the settings can't be read or applied. The switch
    /// stays cooked in that case.
    pub fn enter_raw(&mut self, fd: impl AsFd) -> Result<(), TermError> {
        if self.saved.is_some() {
            tracing::debug!(message = "enter_raw: already in raw mode, ignoring");
            return Ok(());
        }

        let original = get_settings(&fd).map_err(TermError::EnterRawMode)?;
        let mut raw = original.clone();
        apply_raw_configuration(&mut raw);
        set_settings(&fd, &raw).map_err(TermError::EnterRawMode)?;

        self.saved = Some(original);
        Ok(())
    }

    /// Raw → Cooked, restoring the saved settings exactly. A no-op when already
    /// cooked.
    ///
    /// # Errors
    ///
    /// [`TermError::LeaveRawMode`] if the settings can't be applied. The switch stays
    /// raw so the restore can be attempted again.
    pub fn leave_raw(&mut self, fd: impl AsFd) -> Result<(), TermError> {
        let Some(saved) = self.saved.as_ref() else {
            return Ok(());
        };
        set_settings(&fd, saved).map_err(TermError::LeaveRawMode)?;
        self.saved = None;
        Ok(())
    }
}

/// Puts saved cooked mode `settings` back on `fd` right away, without waiting for
/// pending output to drain. For exit paths that can't reach the [`RawModeSwitch`]
/// holding them (panic hook, process exit).
///
/// # Errors
///
/// [`TermError::LeaveRawMode`] if the settings can't be applied.
pub fn restore_settings_now(fd: impl AsFd, settings: &Termios) -> Result<(), TermError> {
    set_settings_now(fd, settings).map_err(TermError::LeaveRawMode)
}

/// Anything that can switch a terminal between raw and cooked mode.
pub trait RawModeControl {
    /// # Errors
    ///
    /// [`TermError::EnterRawMode`] or [`TermError::Unsupported`].
    fn enter_raw(&mut self) -> Result<(), TermError>;

    /// # Errors
    ///
    /// [`TermError::LeaveRawMode`] or [`TermError::Unsupported`].
    fn leave_raw(&mut self) -> Result<(), TermError>;
}

/// A [`RawModeSwitch`] bound to the terminal device it controls.
#[derive(Debug)]
pub struct RawModeTerminal<D: AsFd> {
    device: D,
    switch: RawModeSwitch,
}

impl<D: AsFd> RawModeTerminal<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            switch: RawModeSwitch::new(),
        }
    }

    pub fn device(&self) -> &D { &self.device }

    pub fn mode(&self) -> TerminalMode { self.switch.mode() }

    pub fn switch(&self) -> &RawModeSwitch { &self.switch }
}

impl<D: AsFd> RawModeControl for RawModeTerminal<D> {
    fn enter_raw(&mut self) -> Result<(), TermError> {
        self.switch.enter_raw(&self.device)
    }

    fn leave_raw(&mut self) -> Result<(), TermError> {
        self.switch.leave_raw(&self.device)
    }
}

/// RAII guard that restores cooked mode when dropped.
///
/// Recommended way to use raw mode as it ensures terminal restoration even on panic.
/// The guarded value stays usable through [`Deref`] / [`DerefMut`].
#[derive(Debug)]
pub struct RawModeGuard<'a, T: RawModeControl> {
    inner: &'a mut T,
}

impl<'a, T: RawModeControl> RawModeGuard<'a, T> {
    /// Enters raw mode and returns the guard.
    ///
    /// # Errors
    ///
    /// See [`RawModeControl::enter_raw()`].
    pub fn new(inner: &'a mut T) -> Result<Self, TermError> {
        inner.enter_raw()?;
        Ok(Self { inner })
    }
}

impl<T: RawModeControl> Deref for RawModeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T { self.inner }
}

impl<T: RawModeControl> DerefMut for RawModeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T { self.inner }
}

impl<T: RawModeControl> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        if let Err(error) = self.inner.leave_raw() {
            tracing::error!(
                message = "RawModeGuard: could not restore cooked mode",
                error = %error
            );
        }
    }
}
