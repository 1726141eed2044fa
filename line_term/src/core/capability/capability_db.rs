// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo tputs

//! The seam between this crate and a terminal capability database. See
//! [`CapabilityDb`] for details.

use super::{BoolCap, NumCap, StringCap};
use std::{fmt::Debug, str::FromStr};

/// Read-only view of a terminal capability database (`terminfo` or equivalent).
///
/// This crate does not interpret capability strings: they are looked up by name and
/// written to the terminal verbatim by [`TermWriter::emit()`]. Padding and parameters
/// are the database's business.
///
/// Implementations must be shareable across threads since the probed database lives in
/// process-wide state (see [`CapabilityGate`]).
///
/// [`CapabilityGate`]: super::CapabilityGate
/// [`TermWriter::emit()`]: crate::TermWriter::emit
pub trait CapabilityDb: Debug + Send + Sync {
    /// The terminal name the database was loaded for (eg: `xterm-256color`).
    fn term_name(&self) -> &str;

    /// Returns the string capability, or [`None`] if the terminal does not have it.
    fn string(&self, cap: StringCap) -> Option<&[u8]>;

    /// Returns `true` if the boolean capability is present.
    fn flag(&self, cap: BoolCap) -> bool;

    /// Returns the numeric capability, or [`None`] if absent.
    fn number(&self, cap: NumCap) -> Option<u16>;

    /// Name based lookup of a string capability (eg: `"cuu1"`). Unknown names and absent
    /// capabilities both return [`None`].
    fn lookup(&self, name: &str) -> Option<&[u8]> {
        StringCap::from_str(name)
            .ok()
            .and_then(|cap| self.string(cap))
    }

    /// Returns `true` if every capability in `caps` is present.
    fn has_all(&self, caps: &[StringCap]) -> bool {
        caps.iter().all(|cap| self.string(*cap).is_some())
    }
}
