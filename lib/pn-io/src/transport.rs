/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io::{self, Read, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecvMode {
    /// return as soon as any data is available
    Partial,
    /// block until the whole buffer is filled or the connection fails
    Exact,
}

/// Blocking send and receive on a connected byte stream socket.
///
/// There is no timeout at this layer. Any deadline should be set on the
/// socket itself, and will show up here as an io error.
pub trait Transport {
    /// Send the buffer with a single write, returning the written size.
    fn send(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Receive into `buf`.
    ///
    /// In [`RecvMode::Exact`] mode the returned size is always `buf.len()`,
    /// a connection closed early is reported as `UnexpectedEof`.
    /// In [`RecvMode::Partial`] mode `0` means the peer has closed.
    fn recv(&mut self, buf: &mut [u8], mode: RecvMode) -> io::Result<usize>;
}

impl<T> Transport for T
where
    T: Read + Write + ?Sized,
{
    fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
        let nw = loop {
            match self.write(buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        self.flush()?;
        Ok(nw)
    }

    fn recv(&mut self, buf: &mut [u8], mode: RecvMode) -> io::Result<usize> {
        match mode {
            RecvMode::Exact => {
                self.read_exact(buf)?;
                Ok(buf.len())
            }
            RecvMode::Partial => loop {
                match self.read(buf) {
                    Ok(n) => return Ok(n),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            },
        }
    }
}
