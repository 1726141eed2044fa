// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal capability names, the capability database seam, and the one-time
//! capability gate.

// Attach sources.
pub mod ansi_capability_db;
pub mod cap_names;
pub mod capability_db;
pub mod capability_gate;
pub mod terminfo_capability_db;

// Re-export.
pub use ansi_capability_db::*;
pub use cap_names::*;
pub use capability_db::*;
pub use capability_gate::*;
pub use terminfo_capability_db::*;
