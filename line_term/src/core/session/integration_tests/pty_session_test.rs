// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words SIGWINCH

use crate::{RawModeControl, ReadOutcome, Support, TermConfig, TermSession,
            core::test_fixtures::read_lines_until, generate_pty_test, probe};
use portable_pty::{Child, PtyPair, PtySize};
use std::{io::{BufRead, BufReader, Write},
          time::Duration};

generate_pty_test! {
    /// End to end run of a session on a real controlling terminal.
    ///
    /// Run with: `cargo test -p r3bl_line_term --lib test_pty_session -- --nocapture`
    ///
    /// ## Test Protocol
    ///
    /// 1. Slave probes (twice, the second answer must be the memoized one), opens the
    ///    session, enters raw mode, and prints `SLAVE_READY`.
    /// 2. Master resizes the PTY to 30x100 while the slave is blocked in a read. The
    ///    slave must see [`ReadOutcome::Resized`] and report the new size.
    /// 3. Master writes `é` as two separate writes. The slave must get one character.
    /// 4. Slave does a non blocking read with nothing pending, leaves raw mode and
    ///    prints `SUCCESS`.
    test_fn: test_pty_session,
    master: pty_master_entry_point,
    slave: pty_slave_entry_point
}

fn pty_master_entry_point(pty_pair: PtyPair, mut child: Box<dyn Child + Send + Sync>) {
    eprintln!("🚀 PTY Master: Starting session test...");

    let mut writer = pty_pair.master.take_writer().expect("Failed to get writer");
    let reader = pty_pair
        .master
        .try_clone_reader()
        .expect("Failed to clone reader");
    let mut reader = BufReader::new(reader);

    let (_, ready) = read_lines_until(&mut reader, "SLAVE_READY");
    assert!(ready, "Slave never signaled ready");

    // Give the slave time to block in read_char().
    std::thread::sleep(Duration::from_millis(200));
    pty_pair
        .master
        .resize(PtySize {
            rows: 30,
            cols: 100,
            pixel_width: 0,
            pixel_height: 0,
        })
        .expect("Failed to resize PTY");

    assert_eq!(expect_line(&mut reader, "RESIZED"), "RESIZED 30 100");

    writer.write_all(&[0xc3]).expect("Failed to write lead byte");
    writer.flush().expect("Failed to flush");
    std::thread::sleep(Duration::from_millis(100));
    writer.write_all(&[0xa9]).expect("Failed to write continuation byte");
    writer.flush().expect("Failed to flush");

    assert_eq!(expect_line(&mut reader, "CHAR"), "CHAR é");

    let (lines, success) = read_lines_until(&mut reader, "SUCCESS");
    assert!(success, "Slave did not finish");
    assert!(lines.iter().any(|it| it == "NO_DATA"), "{lines:?}");

    let status = child.wait().expect("Failed to wait for slave");
    assert!(status.success(), "Slave exited with {status:?}");
    eprintln!("✅ PTY Master: Session test passed!");
}

/// Returns the first line starting with `prefix`, skipping everything else.
fn expect_line(reader: &mut impl BufRead, prefix: &str) -> String {
    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line).expect("Read error");
        assert!(read > 0, "EOF before a line starting with {prefix}");
        let trimmed = line.trim();
        assert!(!trimmed.contains("FAILED:"), "Slave failed: {trimmed}");
        if trimmed.starts_with(prefix) {
            return trimmed.to_string();
        }
        eprintln!("  ⚠️  Skipping: {trimmed}");
    }
}

fn fail(reason: &str) -> ! {
    println!("FAILED: {reason}");
    std::process::exit(1);
}

fn pty_slave_entry_point() -> ! {
    let first = probe();
    let second = probe();
    if first != Support::Supported || second != Support::Supported {
        fail(&format!("probe answered {first:?} then {second:?}"));
    }

    let mut session = TermSession::open(TermConfig::default())
        .unwrap_or_else(|error| fail(&format!("open: {error}")));
    session
        .enter_raw()
        .unwrap_or_else(|error| fail(&format!("enter_raw: {error}")));

    println!("SLAVE_READY");
    let _unused = std::io::stdout().flush();

    match session.read_char(true) {
        Ok(ReadOutcome::Resized) => {
            let size = session.get_screen_size();
            println!("RESIZED {} {}", size.rows, size.cols);
        }
        other => fail(&format!("expected Resized, got {other:?}")),
    }
    let _unused = std::io::stdout().flush();

    match session.read_char(true) {
        Ok(ReadOutcome::Char(ch)) => println!("CHAR {ch}"),
        other => fail(&format!("expected a character, got {other:?}")),
    }

    match session.read_char(false) {
        Ok(ReadOutcome::NoDataAvailable) => println!("NO_DATA"),
        other => fail(&format!("expected no data, got {other:?}")),
    }

    session
        .leave_raw()
        .unwrap_or_else(|error| fail(&format!("leave_raw: {error}")));
    println!("SUCCESS");
    let _unused = std::io::stdout().flush();
    std::process::exit(0);
}
