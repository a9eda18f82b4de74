/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use super::{RecvMode, Transport};

pub trait TransportExt: Transport {
    /// Send the whole buffer in one call.
    ///
    /// A short write is reported as `WriteZero`, the remaining part is never retried.
    fn send_all_once(&mut self, buf: &[u8]) -> io::Result<()> {
        let nw = self.send(buf)?;
        log::trace!("sent {nw}/{} bytes", buf.len());
        if nw != buf.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {nw} of {} bytes sent", buf.len()),
            ));
        }
        Ok(())
    }

    fn recv_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let nr = self.recv(buf, RecvMode::Exact)?;
        log::trace!("received {nr}/{} bytes", buf.len());
        if nr != buf.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("only {nr} of {} bytes received", buf.len()),
            ));
        }
        Ok(())
    }

    /// Read byte by byte into `buf` until it ends with `terminator`, or
    /// `max_size` bytes have been read, or the peer has closed.
    ///
    /// Returns whether the terminator is found and the size read in this call.
    /// Nothing after the terminator is consumed from the transport.
    fn recv_until_terminator(
        &mut self,
        terminator: &[u8],
        max_size: usize,
        buf: &mut Vec<u8>,
    ) -> io::Result<(bool, usize)> {
        let mut byte = [0u8; 1];
        let mut nr: usize = 0;
        while nr < max_size {
            if self.recv(&mut byte, RecvMode::Partial)? == 0 {
                return Ok((false, nr));
            }
            nr += 1;
            buf.push(byte[0]);
            if buf.ends_with(terminator) {
                log::trace!("terminator found after {nr} bytes");
                return Ok((true, nr));
            }
        }
        Ok((false, nr))
    }
}

impl<T: Transport + ?Sized> TransportExt for T {}
