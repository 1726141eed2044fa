// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words terminfo xterm rxvt konsole wezterm alacritty smam rmam xenl DECAWM

//! Capability strings for ANSI / VT100 family terminals, selected by `TERM`.
//!
//! Fallback for hosts without an installed `terminfo` entry for `TERM` (see
//! [`load_capability_db()`]). The terminals it knows all speak the same ANSI control
//! sequences, so the table below is what their `terminfo` entries contain for the
//! handful of capabilities this crate uses. Any other `TERM` value (including unset,
//! `dumb`, and `unknown`) makes the lookup fail, which the [`CapabilityGate`] reports
//! as unsupported.
//!
//! [`CapabilityGate`]: super::CapabilityGate
//! [`load_capability_db()`]: super::load_capability_db

use super::{BoolCap, CapabilityDb, NumCap, StringCap};

/// Environment variable naming the terminal type.
pub const TERM_ENV_VAR: &str = "TERM";

/// `TERM` prefixes of the terminals this database knows. A `TERM` value matches if it
/// equals a prefix or continues it with `-` (eg: `xterm-256color`).
pub const KNOWN_TERM_FAMILIES: &[&str] = &[
    "xterm",
    "screen",
    "tmux",
    "rxvt",
    "vt100",
    "vt102",
    "vt220",
    "linux",
    "ansi",
    "alacritty",
    "foot",
    "kitty",
    "wezterm",
    "konsole",
    "gnome",
    "putty",
    "st",
];

/// Sequences shared by every known family.
const ANSI_STRINGS: &[(StringCap, &[u8])] = &[
    (StringCap::CursorUp, b"\x1b[A"),
    (StringCap::CursorDown, b"\n"),
    (StringCap::CursorLeft, b"\x08"),
    (StringCap::CursorRight, b"\x1b[C"),
    (StringCap::ClrEol, b"\x1b[K"),
    (StringCap::ClrEos, b"\x1b[J"),
    (StringCap::ClearScreen, b"\x1b[H\x1b[2J"),
    (StringCap::ScrollReverse, b"\x1bM"),
    (StringCap::CarriageReturn, b"\r"),
    (StringCap::Bell, b"\x07"),
];

/// `DECAWM` set / reset. The Linux console and the plain VT100 entries do not
/// advertise these.
const AUTO_MARGIN_STRINGS: &[(StringCap, &[u8])] = &[
    (StringCap::EnterAmMode, b"\x1b[?7h"),
    (StringCap::ExitAmMode, b"\x1b[?7l"),
];

/// Families whose entries lack [`StringCap::EnterAmMode`] / [`StringCap::ExitAmMode`].
const NO_AUTO_MARGIN_TOGGLE: &[&str] = &["linux", "vt100", "vt102"];

/// Families whose entries lack [`BoolCap::EatNewlineGlitch`].
const NO_EAT_NEWLINE_GLITCH: &[&str] = &["ansi"];

/// Families whose entries declare no static screen size.
const NO_STATIC_SIZE: &[&str] = &["linux"];

/// Static screen size the other entries declare.
const STATIC_LINES: u16 = 24;
const STATIC_COLUMNS: u16 = 80;

/// [`CapabilityDb`] for ANSI / VT100 family terminals. See the [module docs] for
/// details.
///
/// [module docs]: self
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsiCapabilityDb {
    term_name: String,
    strings: Vec<(StringCap, &'static [u8])>,
    eat_newline_glitch: bool,
    static_size: bool,
}

impl AnsiCapabilityDb {
    /// Loads the entry for the `TERM` environment variable.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let term_name = std::env::var(TERM_ENV_VAR).ok()?;
        Self::from_term_name(&term_name)
    }

    /// Loads the entry for `term_name`, or returns [`None`] if the terminal is unknown.
    #[must_use]
    pub fn from_term_name(term_name: &str) -> Option<Self> {
        let family = family_of(term_name)?;

        let mut strings = ANSI_STRINGS.to_vec();
        if !NO_AUTO_MARGIN_TOGGLE.contains(&family) {
            strings.extend_from_slice(AUTO_MARGIN_STRINGS);
        }

        Some(Self {
            term_name: term_name.to_string(),
            strings,
            eat_newline_glitch: !NO_EAT_NEWLINE_GLITCH.contains(&family),
            static_size: !NO_STATIC_SIZE.contains(&family),
        })
    }
}

fn family_of(term_name: &str) -> Option<&'static str> {
    KNOWN_TERM_FAMILIES.iter().copied().find(|family| {
        term_name == *family
            || term_name
                .strip_prefix(family)
                .is_some_and(|rest| rest.starts_with('-'))
    })
}

impl CapabilityDb for AnsiCapabilityDb {
    fn term_name(&self) -> &str { &self.term_name }

    fn string(&self, cap: StringCap) -> Option<&[u8]> {
        self.strings
            .iter()
            .find_map(|(it, bytes)| (*it == cap).then_some(*bytes))
    }

    fn flag(&self, cap: BoolCap) -> bool {
        match cap {
            // Every known family wraps at the right margin.
            BoolCap::AutoRightMargin => true,
            BoolCap::EatNewlineGlitch => self.eat_newline_glitch,
        }
    }

    fn number(&self, cap: NumCap) -> Option<u16> {
        if !self.static_size {
            return None;
        }
        match cap {
            NumCap::Lines => Some(STATIC_LINES),
            NumCap::Columns => Some(STATIC_COLUMNS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::REQUIRED_CAPS;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("xterm")]
    #[test_case("xterm-256color")]
    #[test_case("screen-256color")]
    #[test_case("tmux-256color")]
    #[test_case("linux")]
    #[test_case("vt100")]
    fn known_terminals_have_required_caps(term: &str) {
        let db = AnsiCapabilityDb::from_term_name(term).unwrap();
        assert!(db.has_all(&REQUIRED_CAPS));
        assert_eq!(db.term_name(), term);
    }

    #[test_case("")]
    #[test_case("dumb")]
    #[test_case("unknown")]
    #[test_case("xtermish")]
    #[test_case("emacs")]
    fn unknown_terminals_fail_lookup(term: &str) {
        assert_eq!(AnsiCapabilityDb::from_term_name(term), None);
    }

    #[test]
    fn linux_console_has_no_auto_margin_toggle() {
        let db = AnsiCapabilityDb::from_term_name("linux").unwrap();
        assert_eq!(db.string(StringCap::EnterAmMode), None);
        assert_eq!(db.string(StringCap::ExitAmMode), None);
        assert!(db.flag(BoolCap::AutoRightMargin));
    }

    #[test]
    fn lookup_by_short_name() {
        let db = AnsiCapabilityDb::from_term_name("xterm-256color").unwrap();
        assert_eq!(db.lookup("el"), Some(&b"\x1b[K"[..]));
        assert_eq!(db.lookup("rmam"), Some(&b"\x1b[?7l"[..]));
        assert_eq!(db.lookup("no-such-cap"), None);
    }

    #[test_case("xterm-256color", true, Some(80))]
    #[test_case("linux", true, None)]
    #[test_case("ansi", false, Some(80))]
    fn flags_and_numbers_follow_family(
        term: &str,
        eat_newline_glitch: bool,
        columns: Option<u16>,
    ) {
        let db = AnsiCapabilityDb::from_term_name(term).unwrap();
        assert!(db.flag(BoolCap::AutoRightMargin));
        assert_eq!(db.flag(BoolCap::EatNewlineGlitch), eat_newline_glitch);
        assert_eq!(db.number(NumCap::Columns), columns);
    }
}
