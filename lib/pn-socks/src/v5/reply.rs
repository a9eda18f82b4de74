/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use pn_io::{Transport, TransportExt};

use super::{SOCKS5_VERSION, SocksNegotiationError, SocksReplyParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Socks5Reply {
    Succeeded(SocketAddr),
    GeneralServerFailure,
    ForbiddenByRule,
    NetworkUnreachable,
    HostUnreachable,
    ConnectionRefused,
    TtlExpired,
    CommandNotSupported,
    AddressTypeNotSupported,
    ConnectionTimedOut,
    Unassigned(u8),
}

impl Socks5Reply {
    fn failed(code: u8) -> Self {
        match code {
            0x01 => Socks5Reply::GeneralServerFailure,
            0x02 => Socks5Reply::ForbiddenByRule,
            0x03 => Socks5Reply::NetworkUnreachable,
            0x04 => Socks5Reply::HostUnreachable,
            0x05 => Socks5Reply::ConnectionRefused,
            0x06 => Socks5Reply::TtlExpired,
            0x07 => Socks5Reply::CommandNotSupported,
            0x08 => Socks5Reply::AddressTypeNotSupported,
            0x09 => Socks5Reply::ConnectionTimedOut,
            n => Socks5Reply::Unassigned(n),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Socks5Reply::Succeeded(_) => 0x00,
            Socks5Reply::GeneralServerFailure => 0x01,
            Socks5Reply::ForbiddenByRule => 0x02,
            Socks5Reply::NetworkUnreachable => 0x03,
            Socks5Reply::HostUnreachable => 0x04,
            Socks5Reply::ConnectionRefused => 0x05,
            Socks5Reply::TtlExpired => 0x06,
            Socks5Reply::CommandNotSupported => 0x07,
            Socks5Reply::AddressTypeNotSupported => 0x08,
            Socks5Reply::ConnectionTimedOut => 0x09,
            Socks5Reply::Unassigned(n) => *n,
        }
    }

    pub const fn error_message(&self) -> &'static str {
        match self {
            // message from rfc1928
            Socks5Reply::Succeeded(_) => "Succeeded",
            Socks5Reply::GeneralServerFailure => "General SOCKS server failure",
            Socks5Reply::ForbiddenByRule => "Connection not allowed by ruleset",
            Socks5Reply::NetworkUnreachable => "Network unreachable",
            Socks5Reply::HostUnreachable => "Host unreachable",
            Socks5Reply::ConnectionRefused => "Connection refused",
            Socks5Reply::TtlExpired => "TTL expired",
            Socks5Reply::CommandNotSupported => "Command not supported",
            Socks5Reply::AddressTypeNotSupported => "Address type not supported",
            // message from socks-6-09
            Socks5Reply::ConnectionTimedOut => "Connection attempt timed out",
            Socks5Reply::Unassigned(_) => "unassigned reply code",
        }
    }

    /// Receive the reply to a request.
    ///
    /// On success the bound address is drained from the stream completely,
    /// its content is not checked. On failure nothing after the fixed
    /// 4-byte header is read.
    pub(crate) fn recv<T>(stream: &mut T) -> Result<Self, SocksReplyParseError>
    where
        T: Transport + ?Sized,
    {
        let mut buf = [0u8; 4];
        stream.recv_exact(&mut buf)?;
        let version = buf[0];
        if version != SOCKS5_VERSION {
            return Err(SocksNegotiationError::InvalidVersion(version).into());
        }

        let code = buf[1];
        if code != 0x00 {
            return Ok(Socks5Reply::failed(code));
        }

        let _rsv = buf[2];

        let addr = match buf[3] {
            0x01 => {
                let mut left_bytes = [0u8; 6];
                stream.recv_exact(&mut left_bytes)?;
                let ip4 = Ipv4Addr::new(left_bytes[0], left_bytes[1], left_bytes[2], left_bytes[3]);
                let port = u16::from_be_bytes([left_bytes[4], left_bytes[5]]);
                SocketAddr::new(IpAddr::V4(ip4), port)
            }
            0x04 => {
                let mut left_bytes = [0u8; 18];
                stream.recv_exact(&mut left_bytes)?;
                let mut ip_bytes = [0u8; 16];
                ip_bytes.copy_from_slice(&left_bytes[0..16]);
                let port = u16::from_be_bytes([left_bytes[16], left_bytes[17]]);
                SocketAddr::new(IpAddr::V6(Ipv6Addr::from(ip_bytes)), port)
            }
            atyp => return Err(SocksNegotiationError::InvalidAddrType(atyp).into()),
        };

        Ok(Socks5Reply::Succeeded(addr))
    }
}

impl fmt::Display for Socks5Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04x})", self.error_message(), self.code())
    }
}
