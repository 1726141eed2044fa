// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words codeset

use smallvec::SmallVec;

/// Locale variables in precedence order. The first non-empty one wins.
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Byte written in place of a character the encoding cannot represent.
pub const PLACEHOLDER_BYTE: u8 = b'?';

/// Encoded form of one character. Four bytes covers every UTF-8 sequence.
pub type EncodedChar = SmallVec<[u8; 4]>;

/// Character encoding used for terminal input and output, chosen from the locale.
///
/// | Locale                            | Encoding   |
/// | :-------------------------------- | :--------- |
/// | `C`, `POSIX`                      | [`Ascii`]  |
/// | codeset `UTF-8` / `utf8`          | [`Utf8`]   |
/// | codeset `ISO-8859-1` / `latin1`   | [`Latin1`] |
/// | unset, or any other codeset       | [`Utf8`]   |
///
/// [`Ascii`]: TermEncoding::Ascii
/// [`Utf8`]: TermEncoding::Utf8
/// [`Latin1`]: TermEncoding::Latin1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermEncoding {
    #[default]
    Utf8,
    Latin1,
    Ascii,
}

impl TermEncoding {
    #[must_use]
    pub fn from_env() -> Self { Self::from_locale_vars(|name| std::env::var(name).ok()) }

    /// Picks the encoding from the locale variables, read through `get_var` so tests
    /// do not have to touch the process environment.
    pub fn from_locale_vars(get_var: impl Fn(&str) -> Option<String>) -> Self {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|name| get_var(name))
            .find(|value| !value.is_empty())
            .map_or(Self::default(), |locale| Self::from_locale_name(&locale))
    }

    /// Parses a locale name such as `en_US.UTF-8` or `de_DE.ISO-8859-1@euro`.
    #[must_use]
    pub fn from_locale_name(locale: &str) -> Self {
        if locale == "C" || locale == "POSIX" {
            return Self::Ascii;
        }

        let codeset = locale
            .split_once('.')
            .map_or("", |(_, rest)| rest.split('@').next().unwrap_or(rest));
        let normalized: String = codeset
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|it| it.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "iso88591" | "latin1" => Self::Latin1,
            _ => Self::Utf8,
        }
    }

    /// Encodes `ch` into `out` (which is cleared first). Returns `false`, leaving `out`
    /// empty, if the encoding has no representation for `ch`.
    pub fn encode(&self, ch: char, out: &mut EncodedChar) -> bool {
        out.clear();
        match self {
            Self::Utf8 => {
                let mut buf = [0; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                true
            }
            Self::Latin1 => u8::try_from(ch).map(|byte| out.push(byte)).is_ok(),
            Self::Ascii => u8::try_from(ch)
                .ok()
                .filter(u8::is_ascii)
                .map(|byte| out.push(byte))
                .is_some(),
        }
    }

    /// Like [`encode`](Self::encode) but substitutes [`PLACEHOLDER_BYTE`] for
    /// unencodable characters.
    #[must_use]
    pub fn encode_or_placeholder(&self, ch: char) -> EncodedChar {
        let mut out = EncodedChar::new();
        if !self.encode(ch, &mut out) {
            out.push(PLACEHOLDER_BYTE);
        }
        out
    }
}
