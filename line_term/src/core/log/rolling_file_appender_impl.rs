// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

/// Creates a (never rolling) appender for the log file at `path`. The file is created
/// if it doesn't exist, and appended to if it does.
///
/// Note that if you wrap this up in a non blocking writer, events logged right before
/// the process is suspended or exits may be lost.
///
/// # Errors
///
/// Returns an error if:
/// - The path has no parent directory
/// - The path has no file name
pub fn try_create(
    path: &Path,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let parent = match path.parent() {
        Some(it) if it.as_os_str().is_empty() => Path::new("."),
        Some(it) => it,
        None => miette::bail!(
            "Can't access the folder of log file {}. It might not exist.",
            path.display()
        ),
    };

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!("Log file path {} has no file name.", path.display())
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}
