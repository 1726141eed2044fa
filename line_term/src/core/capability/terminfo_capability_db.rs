// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo cuu smam rmam xenl

//! The production [`CapabilityDb`]: the compiled `terminfo` entry installed for
//! `TERM`.
//!
//! Only the capabilities named in [`StringCap`], [`BoolCap`], and [`NumCap`] are read,
//! once, when the entry is loaded. Padding (`$<5>`, `$<50/*>`) is stripped from the
//! strings since nothing here delays output for it.

use super::{BoolCap, CapabilityDb, NumCap, StringCap, TERM_ENV_VAR};
use strum::IntoEnumIterator;
use terminfo::{Database, capability as cap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminfoCapabilityDb {
    term_name: String,
    strings: Vec<(StringCap, Vec<u8>)>,
    flags: Vec<BoolCap>,
    numbers: Vec<(NumCap, u16)>,
}

impl TerminfoCapabilityDb {
    /// Loads the entry for the `TERM` environment variable.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let term_name = std::env::var(TERM_ENV_VAR).ok()?;
        Self::from_term_name(&term_name)
    }

    /// Loads the installed entry for `term_name`. Returns [`None`] if there is none or
    /// it can't be parsed.
    #[must_use]
    pub fn from_term_name(term_name: &str) -> Option<Self> {
        if term_name.is_empty() {
            return None;
        }
        match Database::from_name(term_name) {
            Ok(db) => Some(Self::from_database(term_name, &db)),
            Err(error) => {
                tracing::debug!(
                    message = "no usable terminfo entry",
                    term = term_name,
                    error = %error
                );
                None
            }
        }
    }

    #[must_use]
    pub fn from_database(term_name: &str, db: &Database) -> Self {
        Self {
            term_name: term_name.to_string(),
            strings: StringCap::iter()
                .filter_map(|it| read_string(db, it).map(|bytes| (it, bytes)))
                .collect(),
            flags: BoolCap::iter().filter(|it| read_flag(db, *it)).collect(),
            numbers: NumCap::iter()
                .filter_map(|it| read_number(db, it).map(|n| (it, n)))
                .collect(),
        }
    }
}

fn read_string(db: &Database, which: StringCap) -> Option<Vec<u8>> {
    macro_rules! get {
        ($cap:ident) => {
            db.get::<cap::$cap>().map(|it| strip_padding(it.as_ref()))
        };
    }
    match which {
        StringCap::CursorUp => get!(CursorUp),
        StringCap::CursorDown => get!(CursorDown),
        StringCap::CursorLeft => get!(CursorLeft),
        StringCap::CursorRight => get!(CursorRight),
        StringCap::ClrEol => get!(ClrEol),
        StringCap::ClrEos => get!(ClrEos),
        StringCap::ClearScreen => get!(ClearScreen),
        StringCap::ScrollReverse => get!(ScrollReverse),
        StringCap::CarriageReturn => get!(CarriageReturn),
        StringCap::Bell => get!(Bell),
        StringCap::EnterAmMode => get!(EnterAmMode),
        StringCap::ExitAmMode => get!(ExitAmMode),
    }
}

fn read_flag(db: &Database, which: BoolCap) -> bool {
    match which {
        BoolCap::AutoRightMargin => {
            matches!(db.get::<cap::AutoRightMargin>(), Some(cap::AutoRightMargin(true)))
        }
        BoolCap::EatNewlineGlitch => {
            matches!(db.get::<cap::EatNewlineGlitch>(), Some(cap::EatNewlineGlitch(true)))
        }
    }
}

fn read_number(db: &Database, which: NumCap) -> Option<u16> {
    let value = match which {
        NumCap::Lines => db.get::<cap::Lines>().map(|cap::Lines(n)| n),
        NumCap::Columns => db.get::<cap::Columns>().map(|cap::Columns(n)| n),
    }?;
    u16::try_from(value).ok().filter(|n| *n > 0)
}

/// Removes `$<..>` padding specifications. A `$<` that is not followed by a well
/// formed delay is kept as is.
#[must_use]
pub fn strip_padding(bytes: &[u8]) -> Vec<u8> {
    let mut acc = Vec::with_capacity(bytes.len());
    let mut rest = bytes;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix(b"$<")
            && let Some(end) = after.iter().position(|it| *it == b'>')
            && is_delay(&after[..end])
        {
            rest = &after[end + 1..];
            continue;
        }
        if let Some((first, tail)) = rest.split_first() {
            acc.push(*first);
            rest = tail;
        }
    }
    acc
}

fn is_delay(spec: &[u8]) -> bool {
    spec.first().is_some_and(u8::is_ascii_digit)
        && spec
            .iter()
            .all(|it| it.is_ascii_digit() || matches!(it, b'.' | b'*' | b'/'))
}

impl CapabilityDb for TerminfoCapabilityDb {
    fn term_name(&self) -> &str { &self.term_name }

    fn string(&self, cap: StringCap) -> Option<&[u8]> {
        self.strings
            .iter()
            .find_map(|(it, bytes)| (*it == cap).then_some(bytes.as_slice()))
    }

    fn flag(&self, cap: BoolCap) -> bool { self.flags.contains(&cap) }

    fn number(&self, cap: NumCap) -> Option<u16> {
        self.numbers
            .iter()
            .find_map(|(it, n)| (*it == cap).then_some(*n))
    }
}
