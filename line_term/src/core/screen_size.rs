// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words winsize tcgetwinsize ioctl

//! Screen size with fallbacks. See [`ScreenDimensions::resolve()`] for details.

use crate::{CapabilityDb, NumCap};
use rustix::fd::AsFd;
use std::num::NonZeroU16;

pub const DEFAULT_ROWS: u16 = 24;
pub const DEFAULT_COLS: u16 = 80;

pub const LINES_ENV_VAR: &str = "LINES";
pub const COLUMNS_ENV_VAR: &str = "COLUMNS";

/// Rows and columns, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub rows: u16,
    pub cols: u16,
}

/// Window size as the OS reported it. Either field may be 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawWindowSize {
    pub rows: u16,
    pub cols: u16,
}

/// Asks the OS for the window size of the terminal `fd` refers to.
pub fn query_os_window_size(fd: impl AsFd) -> Option<RawWindowSize> {
    rustix::termios::tcgetwinsize(fd)
        .ok()
        .map(|winsize| RawWindowSize {
            rows: winsize.ws_row,
            cols: winsize.ws_col,
        })
}

/// Last screen size the OS reported, per dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenDimensions {
    rows: Option<NonZeroU16>,
    cols: Option<NonZeroU16>,
}

impl ScreenDimensions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: None,
            cols: None,
        }
    }

    /// Works out the screen size. Each dimension is taken from the first of these that
    /// has a positive value:
    ///
    /// 1. `os_report` (which is then cached)
    /// 2. the cached value from an earlier OS report
    /// 3. `LINES` / `COLUMNS`, read through `get_var`
    /// 4. the static `lines` / `cols` of the capability database
    /// 5. [`DEFAULT_ROWS`] x [`DEFAULT_COLS`]
    ///
    /// A zero from the OS is treated as a transient misreport: it is never cached and
    /// never returned. With `avoid_last_column` one column fewer is reported, but never
    /// fewer than 1.
    pub fn resolve(
        &mut self,
        os_report: Option<RawWindowSize>,
        get_var: impl Fn(&str) -> Option<String>,
        db: Option<&dyn CapabilityDb>,
        avoid_last_column: bool,
    ) -> ScreenSize {
        if let Some(report) = os_report {
            if let Some(rows) = NonZeroU16::new(report.rows) {
                self.rows = Some(rows);
            }
            if let Some(cols) = NonZeroU16::new(report.cols) {
                self.cols = Some(cols);
            }
        }

        let fallback = |env_var: &str, cap: NumCap, default: u16| {
            get_var(env_var)
                .and_then(|value| value.trim().parse::<u16>().ok())
                .filter(|it| *it > 0)
                .or_else(|| db.and_then(|db| db.number(cap)).filter(|it| *it > 0))
                .unwrap_or(default)
        };

        let rows = self.rows.map_or_else(
            || fallback(LINES_ENV_VAR, NumCap::Lines, DEFAULT_ROWS),
            NonZeroU16::get,
        );
        let cols = self.cols.map_or_else(
            || fallback(COLUMNS_ENV_VAR, NumCap::Columns, DEFAULT_COLS),
            NonZeroU16::get,
        );

        ScreenSize {
            rows,
            cols: if avoid_last_column {
                cols.saturating_sub(1).max(1)
            } else {
                cols
            },
        }
    }
}
