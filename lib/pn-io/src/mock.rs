/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

//! A scripted in-memory stream for protocol tests.
//!
//! Reads and writes are checked against the script in order. Reading past
//! the end of the script returns EOF, writing past it panics.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

#[derive(Debug)]
enum Action {
    Read(Vec<u8>),
    Write(Vec<u8>),
    ReadError(io::ErrorKind),
    WriteError(io::ErrorKind),
    ShortWrite(usize),
}

#[derive(Default)]
pub struct Builder {
    actions: VecDeque<Action>,
}

impl Builder {
    pub fn new() -> Self {
        Builder::default()
    }

    /// Data that will be returned to the reader.
    pub fn read(&mut self, buf: &[u8]) -> &mut Self {
        if !buf.is_empty() {
            self.actions.push_back(Action::Read(buf.to_vec()));
        }
        self
    }

    /// Data that the writer is expected to write.
    pub fn write(&mut self, buf: &[u8]) -> &mut Self {
        if !buf.is_empty() {
            self.actions.push_back(Action::Write(buf.to_vec()));
        }
        self
    }

    pub fn read_error(&mut self, kind: io::ErrorKind) -> &mut Self {
        self.actions.push_back(Action::ReadError(kind));
        self
    }

    pub fn write_error(&mut self, kind: io::ErrorKind) -> &mut Self {
        self.actions.push_back(Action::WriteError(kind));
        self
    }

    /// Accept at most `size` bytes for the next write, whatever the content is.
    pub fn short_write(&mut self, size: usize) -> &mut Self {
        self.actions.push_back(Action::ShortWrite(size));
        self
    }

    pub fn build(&mut self) -> Mock {
        Mock {
            actions: std::mem::take(&mut self.actions),
            written: Vec::new(),
        }
    }
}

pub struct Mock {
    actions: VecDeque<Action>,
    written: Vec<u8>,
}

impl Mock {
    /// All bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Scripted read bytes that have not been consumed yet.
    pub fn remaining_read(&self) -> usize {
        self.actions
            .iter()
            .map(|a| match a {
                Action::Read(data) => data.len(),
                _ => 0,
            })
            .sum()
    }

    pub fn is_finished(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Read for Mock {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(action) = self.actions.front_mut() else {
            return Ok(0);
        };
        match action {
            Action::Read(data) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                data.drain(..n);
                if data.is_empty() {
                    self.actions.pop_front();
                }
                Ok(n)
            }
            Action::ReadError(kind) => {
                let kind = *kind;
                self.actions.pop_front();
                Err(io::Error::new(kind, "mock read error"))
            }
            a => panic!("unexpected read, next action is {a:?}"),
        }
    }
}

impl Write for Mock {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(action) = self.actions.front_mut() else {
            panic!("unexpected write of {} bytes: {buf:?}", buf.len());
        };
        match action {
            Action::Write(expected) => {
                let n = expected.len().min(buf.len());
                assert_eq!(&buf[..n], &expected[..n], "write mismatch");
                expected.drain(..n);
                if expected.is_empty() {
                    self.actions.pop_front();
                }
                self.written.extend_from_slice(&buf[..n]);
                Ok(n)
            }
            Action::WriteError(kind) => {
                let kind = *kind;
                self.actions.pop_front();
                Err(io::Error::new(kind, "mock write error"))
            }
            Action::ShortWrite(size) => {
                let n = (*size).min(buf.len());
                self.actions.pop_front();
                self.written.extend_from_slice(&buf[..n]);
                Ok(n)
            }
            a => panic!("unexpected write, next action is {a:?}"),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
