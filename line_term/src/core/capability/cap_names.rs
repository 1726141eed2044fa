// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words cuu cud cub cuf smam rmam xenl

//! Standard short names of the terminal capabilities this crate consumes.
//!
//! The [`Display`] and [`FromStr`] impls (generated by [`strum_macros`]) use the short
//! capability names, so `"cuu1".parse::<StringCap>()` yields
//! [`StringCap::CursorUp`].
//!
//! [`Display`]: std::fmt::Display
//! [`FromStr`]: std::str::FromStr

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// String capabilities: opaque byte sequences emitted verbatim to the terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum StringCap {
    /// Move the cursor up one line.
    #[strum(serialize = "cuu1")]
    CursorUp,
    /// Move the cursor down one line.
    #[strum(serialize = "cud1")]
    CursorDown,
    /// Move the cursor left one column.
    #[strum(serialize = "cub1")]
    CursorLeft,
    /// Move the cursor right one column.
    #[strum(serialize = "cuf1")]
    CursorRight,
    /// Clear to end of line.
    #[strum(serialize = "el")]
    ClrEol,
    /// Clear to end of screen.
    #[strum(serialize = "ed")]
    ClrEos,
    /// Clear the whole screen and home the cursor.
    #[strum(serialize = "clear")]
    ClearScreen,
    /// Scroll text down (reverse index).
    #[strum(serialize = "ri")]
    ScrollReverse,
    /// Carriage return.
    #[strum(serialize = "cr")]
    CarriageReturn,
    /// Audible signal.
    #[strum(serialize = "bel")]
    Bell,
    /// Turn on automatic margins.
    #[strum(serialize = "smam")]
    EnterAmMode,
    /// Turn off automatic margins.
    #[strum(serialize = "rmam")]
    ExitAmMode,
}

/// Boolean capabilities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum BoolCap {
    /// Terminal wraps to the next line after writing the last column.
    #[strum(serialize = "am")]
    AutoRightMargin,
    /// A newline right after the last column is ignored (the "eat newline" glitch).
    #[strum(serialize = "xenl")]
    EatNewlineGlitch,
}

/// Numeric capabilities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
pub enum NumCap {
    /// Static number of lines on the screen.
    #[strum(serialize = "lines")]
    Lines,
    /// Static number of columns on the screen.
    #[strum(serialize = "cols")]
    Columns,
}

/// The capabilities a terminal must have for [`probe()`] to report
/// [`Support::Supported`].
///
/// [`Support::Supported`]: crate::Support::Supported
/// [`probe()`]: crate::probe
pub const REQUIRED_CAPS: [StringCap; 9] = [
    StringCap::CursorUp,
    StringCap::CursorDown,
    StringCap::CursorLeft,
    StringCap::CursorRight,
    StringCap::ClrEol,
    StringCap::ClrEos,
    StringCap::ClearScreen,
    StringCap::ScrollReverse,
    StringCap::CarriageReturn,
];
