/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::net::IpAddr;

use bytes::{BufMut, BytesMut};

use pn_types::net::{AddressError, Host, TargetAddr};

use super::SOCKS5_VERSION;

const SOCKS5_CMD_TCP_CONNECT: u8 = 0x01;

const SOCKS5_ATYP_IPV4: u8 = 0x01;
const SOCKS5_ATYP_DOMAIN: u8 = 0x03;
const SOCKS5_ATYP_IPV6: u8 = 0x04;

fn encoded_addr_len(addr: &TargetAddr) -> usize {
    let addr_len = match addr.host() {
        Host::Ip(IpAddr::V4(_)) => 4,
        Host::Ip(IpAddr::V6(_)) => 16,
        Host::Domain(domain) => 1 + domain.len(),
    };
    1 + addr_len + 2
}

/// Append the `ATYP || DST.ADDR || DST.PORT` part of a request to `buf`.
///
/// All multi-byte fields are in network byte order. Nothing is written if
/// the address is invalid.
pub fn encode_addr(addr: &TargetAddr, buf: &mut BytesMut) -> Result<(), AddressError> {
    addr.check()?;

    buf.reserve(encoded_addr_len(addr));
    match addr.host() {
        Host::Domain(domain) => {
            let Ok(len) = u8::try_from(domain.len()) else {
                return Err(AddressError::DomainTooLong(domain.len()));
            };
            buf.put_u8(SOCKS5_ATYP_DOMAIN);
            buf.put_u8(len);
            buf.put_slice(domain.as_bytes());
        }
        Host::Ip(IpAddr::V4(ip4)) => {
            buf.put_u8(SOCKS5_ATYP_IPV4);
            buf.put_slice(&ip4.octets());
        }
        Host::Ip(IpAddr::V6(ip6)) => {
            // No need to do ipv4 mapped address check here
            buf.put_u8(SOCKS5_ATYP_IPV6);
            buf.put_slice(&ip6.octets());
        }
    }
    buf.put_u16(addr.port());
    Ok(())
}

/// An encoded CONNECT request, ready to be sent.
pub struct Socks5Request {
    buf: BytesMut,
}

impl Socks5Request {
    pub fn tcp_connect(addr: &TargetAddr) -> Result<Self, AddressError> {
        let mut buf = BytesMut::with_capacity(3 + encoded_addr_len(addr));
        buf.put_u8(SOCKS5_VERSION);
        buf.put_u8(SOCKS5_CMD_TCP_CONNECT);
        buf.put_u8(0x00);
        encode_addr(addr, &mut buf)?;
        Ok(Socks5Request { buf })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_ref()
    }
}
