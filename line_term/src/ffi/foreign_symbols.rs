// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words nanosleep noraw

use super::foreign_entry_points::{ue_bell, ue_carriage_return, ue_clear_screen,
                                  ue_clr_eol, ue_clr_eos, ue_down, ue_enter_am_mode,
                                  ue_exit_am_mode, ue_flush, ue_get_screen_size,
                                  ue_init_term, ue_last_error, ue_left, ue_line_feed,
                                  ue_nanosleep, ue_noraw, ue_pause, ue_raw,
                                  ue_read_char, ue_right, ue_scroll_reverse, ue_up,
                                  ue_write_char};

/// Prefix the host runtime expects on the names of C calling convention symbols.
pub const FOREIGN_SYMBOL_PREFIX: &str = "(cs)";

/// One entry of the table a host registers with its foreign procedure interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignSymbol {
    pub name: &'static str,
    pub address: *const (),
}

macro_rules! symbols {
    ($($name:ident),* $(,)?) => {
        vec![$(ForeignSymbol {
            name: concat!("(cs)", stringify!($name)),
            address: $name as *const (),
        }),*]
    };
}

/// Every `ue_*` entry point, named with [`FOREIGN_SYMBOL_PREFIX`].
#[must_use]
pub fn foreign_symbols() -> Vec<ForeignSymbol> {
    symbols![
        ue_init_term,
        ue_read_char,
        ue_write_char,
        ue_flush,
        ue_get_screen_size,
        ue_raw,
        ue_noraw,
        ue_enter_am_mode,
        ue_exit_am_mode,
        ue_pause,
        ue_nanosleep,
        ue_up,
        ue_down,
        ue_left,
        ue_right,
        ue_clr_eol,
        ue_clr_eos,
        ue_clear_screen,
        ue_scroll_reverse,
        ue_bell,
        ue_carriage_return,
        ue_line_feed,
        ue_last_error,
    ]
}
