/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

use pn_http::connect::{HttpConnectError, HttpConnectResponseError};
use pn_socks::Socks5ConnectError;
use pn_types::net::AddressError;

#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error("transport error: {0}")]
    Transport(io::Error),
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),
    #[error("authentication rejected by upstream")]
    AuthRejected,
    #[error("auth method {0:#04x} selected by upstream was not offered")]
    MethodNotAccepted(u8),
    #[error("upstream rejected the connection with code {0}")]
    UpstreamRejected(u16),
    #[error("target domain too long ({0} bytes)")]
    AddressTooLong(usize),
    #[error("unsupported address family")]
    UnsupportedAddressFamily,
    #[error("no end of response header found within {0} bytes")]
    ResponseTooLarge(usize),
}

pub type NegotiationOutcome = Result<(), NegotiationError>;

impl NegotiationError {
    /// The raw SOCKS5 reply code or HTTP status code sent by the upstream.
    pub fn reply_code(&self) -> Option<u16> {
        match self {
            NegotiationError::UpstreamRejected(code) => Some(*code),
            _ => None,
        }
    }

    /// Whether the error was found locally, before any I/O was done.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            NegotiationError::AddressTooLong(_) | NegotiationError::UnsupportedAddressFamily
        )
    }
}

impl From<AddressError> for NegotiationError {
    fn from(e: AddressError) -> Self {
        match e {
            AddressError::DomainTooLong(len) => NegotiationError::AddressTooLong(len),
            AddressError::UnsupportedFamily(_) => NegotiationError::UnsupportedAddressFamily,
        }
    }
}

impl From<Socks5ConnectError> for NegotiationError {
    fn from(e: Socks5ConnectError) -> Self {
        match e {
            Socks5ConnectError::InvalidAddress(e) => e.into(),
            Socks5ConnectError::ReadFailed(e) | Socks5ConnectError::WriteFailed(e) => {
                NegotiationError::Transport(e)
            }
            Socks5ConnectError::MethodNotAccepted(m) => NegotiationError::MethodNotAccepted(m.code()),
            Socks5ConnectError::UnsupportedAuthVersion(_) | Socks5ConnectError::AuthFailed(_) => {
                NegotiationError::AuthRejected
            }
            Socks5ConnectError::InvalidProtocol(e) => {
                NegotiationError::ProtocolViolation(e.to_string())
            }
            Socks5ConnectError::RequestFailed(reply) => {
                NegotiationError::UpstreamRejected(u16::from(reply.code()))
            }
        }
    }
}

impl From<HttpConnectError> for NegotiationError {
    fn from(e: HttpConnectError) -> Self {
        match e {
            HttpConnectError::InvalidAddress(e) => e.into(),
            HttpConnectError::RemoteClosed => NegotiationError::Transport(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "remote closed",
            )),
            HttpConnectError::ReadFailed(e) | HttpConnectError::WriteFailed(e) => {
                NegotiationError::Transport(e)
            }
            HttpConnectError::InvalidResponse(HttpConnectResponseError::TooLargeHeader(size)) => {
                NegotiationError::ResponseTooLarge(size)
            }
            HttpConnectError::InvalidResponse(e) => {
                NegotiationError::ProtocolViolation(e.to_string())
            }
            HttpConnectError::UnexpectedStatusCode(code, _) => {
                NegotiationError::UpstreamRejected(code)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pn_socks::SocksAuthMethod;

    #[test]
    fn from_address_error() {
        let e = NegotiationError::from(AddressError::DomainTooLong(256));
        assert!(matches!(e, NegotiationError::AddressTooLong(256)));
        assert!(e.is_local());

        let e = NegotiationError::from(AddressError::UnsupportedFamily(1));
        assert!(matches!(e, NegotiationError::UnsupportedAddressFamily));
        assert!(e.is_local());
    }

    #[test]
    fn from_socks5_error() {
        let e = NegotiationError::from(Socks5ConnectError::MethodNotAccepted(
            SocksAuthMethod::NoAcceptable,
        ));
        assert!(matches!(e, NegotiationError::MethodNotAccepted(0xff)));
        assert!(!e.is_local());

        let e = NegotiationError::from(Socks5ConnectError::UnsupportedAuthVersion(0x05));
        assert!(matches!(e, NegotiationError::AuthRejected));

        let e = NegotiationError::from(Socks5ConnectError::WriteFailed(io::Error::from(
            io::ErrorKind::BrokenPipe,
        )));
        assert!(matches!(e, NegotiationError::Transport(_)));
        assert_eq!(e.reply_code(), None);
    }

    #[test]
    fn from_http_error() {
        let e = NegotiationError::from(HttpConnectError::UnexpectedStatusCode(
            403,
            "Forbidden".to_string(),
        ));
        assert_eq!(e.reply_code(), Some(403));

        let e = NegotiationError::from(HttpConnectError::InvalidResponse(
            HttpConnectResponseError::TooLargeHeader(1024),
        ));
        assert!(matches!(e, NegotiationError::ResponseTooLarge(1024)));

        let e = NegotiationError::from(HttpConnectError::RemoteClosed);
        match e {
            NegotiationError::Transport(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            e => panic!("unexpected error {e}"),
        }
    }
}
