// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod capability;
pub mod common;
pub mod input;
pub mod locale;
pub mod log;
pub mod output;
pub mod screen_size;
pub mod session;
pub mod terminal_raw_mode;

#[cfg(test)]
pub mod test_fixtures;

// Re-export.
pub use capability::*;
pub use common::*;
pub use input::*;
pub use locale::*;
pub use log::*;
pub use output::*;
pub use screen_size::*;
pub use session::*;
pub use terminal_raw_mode::*;
