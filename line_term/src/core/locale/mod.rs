// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Locale context: the terminal's character encoding, and the incremental decoder
//! that turns input bytes into characters.

// Attach sources.
pub mod decoder_state;
pub mod term_encoding;

// Re-export.
pub use decoder_state::*;
pub use term_encoding::*;
