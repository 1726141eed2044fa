// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The foreign function boundary.
//!
//! The host runtime links the `staticlib` build of this crate and calls the `ue_*`
//! functions. They all work on one process wide [`TermSession`](crate::TermSession)
//! which [`ue_init_term()`] opens. Calling anything else first is a contract violation:
//! the call does nothing, returns its error value if it has one, and
//! [`ue_last_error()`] says why.
//!
//! | Return value                  | Meaning                                    |
//! | :---------------------------- | :----------------------------------------- |
//! | `>= 0` from [`ue_read_char()`] | Unicode scalar value                      |
//! | [`UE_EOF`]                    | End of input                               |
//! | [`UE_RESIZED`]                | Terminal was resized, query the size again |
//! | [`UE_NO_DATA`]                | Non blocking read found nothing            |
//! | [`UE_ERROR`]                  | Failure, see [`ue_last_error()`]           |
//!
//! A host that panics or exits while the session is raw still gets its cooked mode
//! back, see [`install_restore_hooks()`].

// Attach sources.
pub mod foreign_entry_points;
pub mod foreign_symbols;
pub mod terminal_restore;

// Re-export.
pub use foreign_entry_points::*;
pub use foreign_symbols::*;
pub use terminal_restore::*;
