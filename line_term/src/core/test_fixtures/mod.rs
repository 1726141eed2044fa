// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod pty_test_fixtures;
pub mod scripted_byte_source;
pub mod temp_dir;

// Re-export.
pub use pty_test_fixtures::*;
pub use scripted_byte_source::*;
pub use temp_dir::*;
