// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The terminal session: one object that owns everything a line editor needs from the
//! terminal. See [`TermSession`].

// Attach sources.
pub mod term_config;
pub mod term_session;

// Re-export.
pub use term_config::*;
pub use term_session::*;

#[cfg(test)]
mod integration_tests;
