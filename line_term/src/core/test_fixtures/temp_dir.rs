// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use std::{ops::Deref,
          path::PathBuf,
          sync::atomic::{AtomicUsize, Ordering}};

static NEXT_TEMP_DIR_ID: AtomicUsize = AtomicUsize::new(0);

/// Temporary directory that is deleted when dropped.
#[derive(Debug)]
pub struct TempDir {
    pub inner: PathBuf,
}

/// Creates a fresh directory under [`std::env::temp_dir()`].
///
/// # Errors
///
/// If the directory can't be created.
pub fn try_create_temp_dir() -> miette::Result<TempDir> {
    let name = format!(
        "r3bl_line_term_{}_{}_{}",
        std::process::id(),
        chrono::Local::now().timestamp_nanos_opt().unwrap_or_default(),
        NEXT_TEMP_DIR_ID.fetch_add(1, Ordering::SeqCst)
    );
    let inner = std::env::temp_dir().join(name);
    std::fs::create_dir(&inner).into_diagnostic()?;
    Ok(TempDir { inner })
}

impl Drop for TempDir {
    fn drop(&mut self) { std::fs::remove_dir_all(&self.inner).ok(); }
}

impl Deref for TempDir {
    type Target = PathBuf;

    fn deref(&self) -> &Self::Target { &self.inner }
}
