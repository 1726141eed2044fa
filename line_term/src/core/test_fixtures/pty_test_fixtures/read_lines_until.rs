// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::BufRead;

/// Reads lines (trimmed, empty ones skipped) until one contains `sentinel` or the
/// stream ends. Returns the lines before the sentinel line and whether it was found.
///
/// A line containing `FAILED:` panics right away so the slave's reason shows up in
/// the test output.
pub fn read_lines_until(
    reader: &mut impl BufRead,
    sentinel: &str,
) -> (Vec<String>, bool) {
    let mut lines = Vec::new();

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => return (lines, false),
            Ok(_) => {
                let trimmed = line.trim().to_string();
                eprintln!("  <- Slave output: {trimmed:?}");
                assert!(!trimmed.contains("FAILED:"), "Slave failed: {trimmed}");

                if trimmed.contains(sentinel) {
                    return (lines, true);
                }
                if !trimmed.is_empty() {
                    lines.push(trimmed);
                }
            }
            Err(e) => {
                eprintln!("read_lines_until: read error: {e}");
                return (lines, false);
            }
        }
    }
}
