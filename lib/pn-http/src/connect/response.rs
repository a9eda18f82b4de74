/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use http::StatusCode;

use pn_io::{Transport, TransportExt};

use super::{HttpConnectError, HttpConnectResponseError};
use crate::HttpStatusLine;

const HEADER_END: &[u8] = b"\r\n\r\n";

#[derive(Debug)]
pub struct HttpConnectResponse {
    pub version: u8,
    pub code: u16,
    pub reason: String,
}

impl HttpConnectResponse {
    /// Read the response header byte by byte, so no tunneled data after
    /// the header will be consumed. The header lines after the status line
    /// are not inspected.
    fn parse<T>(stream: &mut T, max_header_size: usize) -> Result<Self, HttpConnectError>
    where
        T: Transport + ?Sized,
    {
        let mut header_buf = Vec::<u8>::with_capacity(max_header_size.min(1024));

        let (found, nr) = stream
            .recv_until_terminator(HEADER_END, max_header_size, &mut header_buf)
            .map_err(HttpConnectError::ReadFailed)?;
        if !found {
            return if nr >= max_header_size {
                Err(HttpConnectResponseError::TooLargeHeader(max_header_size).into())
            } else {
                Err(HttpConnectError::RemoteClosed)
            };
        }
        log::trace!("http connect response header of {nr} bytes received");

        HttpConnectResponse::build_from_status_line(&header_buf)
    }

    fn build_from_status_line(buf: &[u8]) -> Result<Self, HttpConnectError> {
        let rsp = HttpStatusLine::parse(buf).map_err(HttpConnectResponseError::InvalidStatusLine)?;
        Ok(HttpConnectResponse {
            version: rsp.version,
            code: rsp.code,
            reason: rsp.reason.into_owned(),
        })
    }

    fn detect_error(&self) -> Result<(), HttpConnectError> {
        if self.code == StatusCode::OK.as_u16() {
            Ok(())
        } else {
            let reason = if self.reason.is_empty() {
                StatusCode::from_u16(self.code)
                    .ok()
                    .and_then(|c| c.canonical_reason())
                    .unwrap_or_default()
                    .to_string()
            } else {
                self.reason.clone()
            };
            Err(HttpConnectError::UnexpectedStatusCode(self.code, reason))
        }
    }

    pub fn recv<T>(stream: &mut T, max_header_size: usize) -> Result<Self, HttpConnectError>
    where
        T: Transport + ?Sized,
    {
        let rsp = HttpConnectResponse::parse(stream, max_header_size)?;
        rsp.detect_error()?;
        Ok(rsp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pn_io::mock::Builder;

    #[test]
    fn recv_established() {
        let mut stream = Builder::new()
            .read(b"HTTP/1.1 200 Connection established\r\n\r\n")
            .build();
        let rsp = HttpConnectResponse::recv(&mut stream, 1024).unwrap();
        assert_eq!(rsp.version, 1);
        assert_eq!(rsp.code, 200);
        assert_eq!(rsp.reason, "Connection established");
    }

    #[test]
    fn recv_with_headers() {
        let mut stream = Builder::new()
            .read(b"HTTP/1.0 200 OK\r\nProxy-Agent: test\r\n")
            .read(b"Via: 1.1 proxy\r\n\r\n\x16\x03\x01")
            .build();
        let rsp = HttpConnectResponse::recv(&mut stream, 1024).unwrap();
        assert_eq!(rsp.version, 0);
        assert_eq!(rsp.code, 200);
        // tunneled data is left untouched
        assert_eq!(stream.remaining_read(), 3);
    }

    #[test]
    fn recv_auth_required() {
        let mut stream = Builder::new()
            .read(b"HTTP/1.1 407 Proxy Authentication Required\r\n\r\n")
            .build();
        let e = HttpConnectResponse::recv(&mut stream, 1024).unwrap_err();
        match e {
            HttpConnectError::UnexpectedStatusCode(code, reason) => {
                assert_eq!(code, 407);
                assert_eq!(reason, "Proxy Authentication Required");
            }
            e => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn recv_other_2xx() {
        let mut stream = Builder::new().read(b"HTTP/1.1 204\r\n\r\n").build();
        let e = HttpConnectResponse::recv(&mut stream, 1024).unwrap_err();
        match e {
            HttpConnectError::UnexpectedStatusCode(code, reason) => {
                assert_eq!(code, 204);
                assert_eq!(reason, "No Content");
            }
            e => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn recv_too_large_header() {
        let mut stream = Builder::new()
            .read(b"HTTP/1.1 200 OK\r\n")
            .read(&[b'x'; 2048])
            .build();
        let e = HttpConnectResponse::recv(&mut stream, 1024).unwrap_err();
        assert!(matches!(
            e,
            HttpConnectError::InvalidResponse(HttpConnectResponseError::TooLargeHeader(1024))
        ));
        assert_eq!(stream.remaining_read(), 17 + 2048 - 1024);
    }

    #[test]
    fn recv_zero_header_size() {
        let mut stream = Builder::new()
            .read(b"HTTP/1.1 200 OK\r\n\r\n")
            .build();
        let e = HttpConnectResponse::recv(&mut stream, 0).unwrap_err();
        assert!(matches!(
            e,
            HttpConnectError::InvalidResponse(HttpConnectResponseError::TooLargeHeader(0))
        ));
        assert_eq!(stream.remaining_read(), 19);
    }

    #[test]
    fn recv_non_utf8_reason() {
        let mut stream = Builder::new()
            .read(b"HTTP/1.1 200 Verbindung hergestellt \xfc\r\n\r\n")
            .build();
        let rsp = HttpConnectResponse::recv(&mut stream, 1024).unwrap();
        assert_eq!(rsp.code, 200);

        let mut stream = Builder::new()
            .read(b"HTTP/1.1 407 Anmeldung erforderlich \xfc\r\n\r\n")
            .build();
        let e = HttpConnectResponse::recv(&mut stream, 1024).unwrap_err();
        assert!(matches!(e, HttpConnectError::UnexpectedStatusCode(407, _)));
    }

    #[test]
    fn recv_remote_closed() {
        let mut stream = Builder::new().build();
        let e = HttpConnectResponse::recv(&mut stream, 1024).unwrap_err();
        assert!(matches!(e, HttpConnectError::RemoteClosed));

        let mut stream = Builder::new().read(b"HTTP/1.1 200 OK\r\n").build();
        let e = HttpConnectResponse::recv(&mut stream, 1024).unwrap_err();
        assert!(matches!(e, HttpConnectError::RemoteClosed));
    }

    #[test]
    fn recv_read_failed() {
        let mut stream = Builder::new()
            .read(b"HTTP/1.1 ")
            .read_error(std::io::ErrorKind::ConnectionReset)
            .build();
        let e = HttpConnectResponse::recv(&mut stream, 1024).unwrap_err();
        assert!(matches!(e, HttpConnectError::ReadFailed(_)));
    }

    #[test]
    fn recv_invalid_status_line() {
        let mut stream = Builder::new()
            .read(b"INVALID STATUS LINE\r\n\r\n")
            .build();
        let e = HttpConnectResponse::recv(&mut stream, 1024).unwrap_err();
        assert!(matches!(
            e,
            HttpConnectError::InvalidResponse(HttpConnectResponseError::InvalidStatusLine(_))
        ));
    }
}
