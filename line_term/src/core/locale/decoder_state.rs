// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Incremental byte to character decoding. See [`DecoderState`] for details.

use super::TermEncoding;
use smallvec::SmallVec;

/// Result of feeding one byte to a [`DecoderState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStep {
    /// The byte completed a character.
    Char(char),
    /// The byte started or continued a multi-byte character. Feed more bytes.
    Incomplete,
    /// The bytes seen so far can't form a character. The decoder has already been
    /// reset.
    Invalid(InvalidSequence),
}

/// A rejected byte sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSequence {
    /// The rejected bytes.
    pub bytes: SmallVec<[u8; 4]>,
    /// Set when the byte that exposed the problem was not itself consumed: it broke an
    /// unfinished sequence but may well start a new character. A resynchronizing reader
    /// feeds it back in.
    pub restart_byte: Option<u8>,
}

impl InvalidSequence {
    /// Every byte involved, in arrival order.
    #[must_use]
    pub fn all_bytes(&self) -> Vec<u8> {
        self.bytes.iter().copied().chain(self.restart_byte).collect()
    }
}

/// Persistent "conversion in progress" accumulator.
///
/// A multi-byte character can arrive split across any number of reads, so this state
/// lives as long as the reader that owns it, and is never shared between readers. It
/// is reset on every decode error and on end of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderState {
    encoding: TermEncoding,
    pending: SmallVec<[u8; 4]>,
    expected_len: usize,
}

impl DecoderState {
    #[must_use]
    pub fn new(encoding: TermEncoding) -> Self {
        Self {
            encoding,
            pending: SmallVec::new(),
            expected_len: 0,
        }
    }

    #[must_use]
    pub fn encoding(&self) -> TermEncoding { self.encoding }

    /// Returns `true` if some bytes of a character have been fed but not all.
    #[must_use]
    pub fn is_mid_sequence(&self) -> bool { !self.pending.is_empty() }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.expected_len = 0;
    }

    pub fn feed(&mut self, byte: u8) -> DecodeStep {
        match self.encoding {
            TermEncoding::Latin1 => DecodeStep::Char(char::from(byte)),
            TermEncoding::Ascii if byte.is_ascii() => DecodeStep::Char(char::from(byte)),
            TermEncoding::Ascii => invalid([byte], None),
            TermEncoding::Utf8 => self.feed_utf8(byte),
        }
    }

    fn feed_utf8(&mut self, byte: u8) -> DecodeStep {
        if self.pending.is_empty() {
            let expected_len = match byte {
                0x00..=0x7f => return DecodeStep::Char(char::from(byte)),
                0xc2..=0xdf => 2,
                0xe0..=0xef => 3,
                0xf0..=0xf4 => 4,
                // Stray continuation byte, overlong lead, or out of range lead.
                _ => return invalid([byte], None),
            };
            self.pending.push(byte);
            self.expected_len = expected_len;
            return DecodeStep::Incomplete;
        }

        if byte & 0b1100_0000 != 0b1000_0000 {
            let bytes = std::mem::take(&mut self.pending);
            self.reset();
            return DecodeStep::Invalid(InvalidSequence {
                bytes,
                restart_byte: Some(byte),
            });
        }

        self.pending.push(byte);
        if self.pending.len() < self.expected_len {
            return DecodeStep::Incomplete;
        }

        let bytes = std::mem::take(&mut self.pending);
        self.reset();
        // Catches overlong forms, surrogates, and code points above U+10FFFF.
        match std::str::from_utf8(&bytes).ok().and_then(|it| it.chars().next()) {
            Some(ch) => DecodeStep::Char(ch),
            None => DecodeStep::Invalid(InvalidSequence {
                bytes,
                restart_byte: None,
            }),
        }
    }
}

fn invalid<const N: usize>(bytes: [u8; N], restart_byte: Option<u8>) -> DecodeStep {
    DecodeStep::Invalid(InvalidSequence {
        bytes: SmallVec::from_slice(&bytes),
        restart_byte,
    })
}
