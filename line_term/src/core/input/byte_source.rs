// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

/// Where [`RawInputChannel`] gets its bytes from.
///
/// | Result                          | Meaning                                            |
/// | :------------------------------ | :------------------------------------------------- |
/// | `Ok(Some(byte))`                | One byte of input                                  |
/// | `Ok(None)`                      | End of input                                       |
/// | `Err(kind == WouldBlock)`       | No byte right now. Only allowed when `!block`      |
/// | `Err(kind == Interrupted)`      | Woken by a signal. The caller rechecks and retries |
/// | any other `Err`                 | The device is unusable                             |
///
/// A non-blocking call must not wait, and must not consume input it does not return.
///
/// [`RawInputChannel`]: crate::RawInputChannel
pub trait ByteSource {
    /// # Errors
    ///
    /// See the table in the [trait docs](ByteSource).
    fn read_byte(&mut self, block: bool) -> io::Result<Option<u8>>;
}

impl<T: ByteSource + ?Sized> ByteSource for Box<T> {
    fn read_byte(&mut self, block: bool) -> io::Result<Option<u8>> {
        (**self).read_byte(block)
    }
}
