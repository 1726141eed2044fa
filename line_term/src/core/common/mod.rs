// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod term_error;

// Re-export.
pub use term_error::*;
