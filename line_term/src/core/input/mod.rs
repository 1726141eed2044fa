// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words SIGWINCH EINTR

//! The read side of the terminal: bytes in, characters and resize notifications out.
//!
//! # Layers
//!
//! ```text
//! SIGWINCH ──► ResizeFlag (one atomic bit)
//!                   │ checked first on every loop iteration
//!                   ▼
//!   TtyByteSource ──► RawInputChannel::read_char(block) ──► ReadOutcome
//!   (mio: tty fd      (DecoderState, DecodeErrorPolicy)
//!    + signal pipe)
//! ```
//!
//! # EINTR Handling
//!
//! An interrupted read is never visible to the caller of
//! [`RawInputChannel::read_char()`]. The channel goes back to the top of its loop,
//! which checks the [`ResizeFlag`] first. That is what makes a resize that arrives
//! during a blocked read observable right away. [`TtyByteSource`] reports a wake-up
//! from its signal pipe the same way, so this also holds when the kernel would have
//! restarted the read.

// Attach sources.
pub mod byte_source;
pub mod raw_input_channel;
pub mod resize_signal;
pub mod tty_byte_source;

// Re-export.
pub use byte_source::*;
pub use raw_input_channel::*;
pub use resize_signal::*;
pub use tty_byte_source::*;
