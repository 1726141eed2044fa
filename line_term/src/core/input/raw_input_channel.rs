// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words resync

//! Character reads with resize notification. See [`RawInputChannel::read_char()`].

use super::{ByteSource, ResizeFlag};
use crate::{DecodeStep, DecoderState, TermEncoding, TermError};
use std::io::ErrorKind;
use strum_macros::{Display, EnumString};

/// Set to `true` to log every byte read from the terminal at debug level. Very noisy.
pub const DEBUG_LINE_TERM_SHOW_INPUT: bool = false;

/// Result of [`RawInputChannel::read_char()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    Char(char),
    /// The input stream ended (read returned zero bytes).
    EndOfInput,
    /// The terminal was resized since the last read. Redraw before reading on.
    Resized,
    /// Only from non-blocking reads: no character has started arriving.
    NoDataAvailable,
}

/// What to do with bytes that don't decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DecodeErrorPolicy {
    /// Reset the decoder and fail the read with [`TermError::InvalidByteSequence`].
    #[default]
    Fail,
    /// Drop the malformed bytes and keep reading. A byte that broke off an unfinished
    /// sequence is decoded again as the possible start of a new character.
    Resync,
}

/// The read path of the terminal.
///
/// Owns the [`DecoderState`], so a multi-byte character split across reads (or across
/// a [`ReadOutcome::Resized`]) is put back together correctly.
#[derive(Debug)]
pub struct RawInputChannel<S: ByteSource> {
    source: S,
    decoder: DecoderState,
    resize_flag: ResizeFlag,
    policy: DecodeErrorPolicy,
    /// Byte to decode before reading from `source` again (see
    /// [`DecodeErrorPolicy::Resync`]).
    replay: Option<u8>,
}

impl<S: ByteSource> RawInputChannel<S> {
    pub fn new(
        source: S,
        encoding: TermEncoding,
        resize_flag: ResizeFlag,
        policy: DecodeErrorPolicy,
    ) -> Self {
        Self {
            source,
            decoder: DecoderState::new(encoding),
            resize_flag,
            policy,
            replay: None,
        }
    }

    pub fn decoder(&self) -> &DecoderState { &self.decoder }

    pub fn source(&self) -> &S { &self.source }

    pub fn source_mut(&mut self) -> &mut S { &mut self.source }

    pub fn resize_flag(&self) -> &ResizeFlag { &self.resize_flag }

    /// Reads one character.
    ///
    /// 1. A pending resize is cleared and reported as [`ReadOutcome::Resized`] before
    ///    anything else, including input that is already buffered.
    /// 2. When `block` is `false` and no character has started arriving, returns
    ///    [`ReadOutcome::NoDataAvailable`] instead of waiting. Once the first byte of a
    ///    multi-byte character has been consumed the rest is waited for, even in a
    ///    non-blocking read, so character boundaries are never lost.
    /// 3. An interrupted read goes back to step 1.
    /// 4. End of input resets the decoder and returns [`ReadOutcome::EndOfInput`].
    ///
    /// # Errors
    ///
    /// - [`TermError::Read`] for any read failure other than interruption.
    /// - [`TermError::InvalidByteSequence`] for malformed input under
    ///   [`DecodeErrorPolicy::Fail`]. The decoder is reset first.
    pub fn read_char(&mut self, block: bool) -> Result<ReadOutcome, TermError> {
        loop {
            if self.resize_flag.take() {
                return Ok(ReadOutcome::Resized);
            }

            let byte = match self.replay.take() {
                Some(byte) => byte,
                None => {
                    let must_block = block || self.decoder.is_mid_sequence();
                    match self.source.read_byte(must_block) {
                        Ok(Some(byte)) => byte,
                        Ok(None) => {
                            self.decoder.reset();
                            return Ok(ReadOutcome::EndOfInput);
                        }
                        Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                        Err(e) if e.kind() == ErrorKind::WouldBlock && !must_block => {
                            return Ok(ReadOutcome::NoDataAvailable);
                        }
                        Err(e) => {
                            self.decoder.reset();
                            return Err(TermError::Read(e));
                        }
                    }
                }
            };

            DEBUG_LINE_TERM_SHOW_INPUT.then(|| {
                tracing::debug!(message = "read_char: byte", byte = format!("{byte:#04x}"));
            });

            match self.decoder.feed(byte) {
                DecodeStep::Char(ch) => return Ok(ReadOutcome::Char(ch)),
                DecodeStep::Incomplete => {}
                DecodeStep::Invalid(sequence) => match self.policy {
                    DecodeErrorPolicy::Fail => {
                        return Err(TermError::InvalidByteSequence {
                            bytes: sequence.all_bytes(),
                        });
                    }
                    DecodeErrorPolicy::Resync => {
                        tracing::warn!(
                            message = "read_char: dropping malformed input",
                            bytes = ?sequence.bytes
                        );
                        self.replay = sequence.restart_byte;
                    }
                },
            }
        }
    }
}
