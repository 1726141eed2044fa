// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

pub mod open_pty_pair;
pub mod read_lines_until;

// Re-export.
pub use open_pty_pair::*;
pub use read_lines_until::*;
