// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ByteSource, ResizeFlag};
use std::{collections::VecDeque,
          io::{self, ErrorKind}};

/// One scripted response of [`ScriptedByteSource::read_byte()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    Byte(u8),
    WouldBlock,
    Interrupted,
    /// Raise the resize flag (as the signal handler would), then report the read as
    /// interrupted.
    ResizeThenInterrupt,
    Eof,
    Error(ErrorKind),
}

/// [`ByteSource`] that replays a script. An exhausted script reads as end of input.
#[derive(Debug, Default)]
pub struct ScriptedByteSource {
    steps: VecDeque<ScriptStep>,
    resize_flag: Option<ResizeFlag>,
    block_flags: Vec<bool>,
}

impl ScriptedByteSource {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes.iter().copied().map(ScriptStep::Byte))
    }

    #[must_use]
    pub fn with_resize_flag(mut self, resize_flag: ResizeFlag) -> Self {
        self.resize_flag = Some(resize_flag);
        self
    }

    /// The `block` argument of every read so far.
    pub fn block_flags(&self) -> &[bool] { &self.block_flags }

    pub fn push(&mut self, step: ScriptStep) { self.steps.push_back(step); }
}

impl ByteSource for ScriptedByteSource {
    fn read_byte(&mut self, block: bool) -> io::Result<Option<u8>> {
        self.block_flags.push(block);
        match self.steps.pop_front() {
            Some(ScriptStep::Byte(byte)) => Ok(Some(byte)),
            Some(ScriptStep::WouldBlock) => Err(ErrorKind::WouldBlock.into()),
            Some(ScriptStep::Interrupted) => Err(ErrorKind::Interrupted.into()),
            Some(ScriptStep::ResizeThenInterrupt) => {
                if let Some(flag) = &self.resize_flag {
                    flag.raise();
                }
                Err(ErrorKind::Interrupted.into())
            }
            Some(ScriptStep::Error(kind)) => Err(kind.into()),
            Some(ScriptStep::Eof) | None => Ok(None),
        }
    }
}
