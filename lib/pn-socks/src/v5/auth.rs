/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use bytes::{BufMut, BytesMut};
use smallvec::SmallVec;

use pn_io::{Transport, TransportExt};
use pn_types::auth::{Password, Username};

use super::{SOCKS5_VERSION, Socks5ConnectError, SocksAuthMethod, SocksNegotiationError};

const USER_AUTH_VERSION: u8 = 0x01;
const USER_AUTH_SUCCEEDED: u8 = 0x00;

pub type SocksAuthMethods = SmallVec<[SocksAuthMethod; 2]>;

/// Offer `methods` to the server and return the one it selected.
pub fn send_and_recv_method<T>(
    stream: &mut T,
    methods: &[SocksAuthMethod],
) -> Result<SocksAuthMethod, Socks5ConnectError>
where
    T: Transport + ?Sized,
{
    let mut buf = BytesMut::with_capacity(2 + methods.len());
    buf.put_u8(SOCKS5_VERSION);
    buf.put_u8(methods.len() as u8);
    for method in methods {
        buf.put_u8(method.code());
    }
    stream
        .send_all_once(buf.as_ref())
        .map_err(Socks5ConnectError::WriteFailed)?;

    let mut rsp = [0u8; 2];
    stream
        .recv_exact(&mut rsp)
        .map_err(Socks5ConnectError::ReadFailed)?;
    if rsp[0] != SOCKS5_VERSION {
        return Err(SocksNegotiationError::InvalidVersion(rsp[0]).into());
    }

    let selected = SocksAuthMethod::from(rsp[1]);
    if !methods.contains(&selected) {
        return Err(Socks5ConnectError::MethodNotAccepted(selected));
    }
    log::debug!("socks5 server selected auth method {selected}");
    Ok(selected)
}

/// Username/password sub-negotiation, see rfc1929.
pub fn proceed_with_user<T>(
    stream: &mut T,
    username: &Username,
    password: &Password,
) -> Result<(), Socks5ConnectError>
where
    T: Transport + ?Sized,
{
    let ulen = username.len();
    let plen = password.len();
    let mut buf = BytesMut::with_capacity(3 + ulen as usize + plen as usize);
    buf.put_u8(USER_AUTH_VERSION);
    buf.put_u8(ulen);
    buf.put_slice(username.as_original().as_bytes());
    buf.put_u8(plen);
    buf.put_slice(password.as_original().as_bytes());
    stream
        .send_all_once(buf.as_ref())
        .map_err(Socks5ConnectError::WriteFailed)?;

    let mut rsp = [0u8; 2];
    stream
        .recv_exact(&mut rsp)
        .map_err(Socks5ConnectError::ReadFailed)?;
    if rsp[0] != USER_AUTH_VERSION {
        return Err(Socks5ConnectError::UnsupportedAuthVersion(rsp[0]));
    }
    if rsp[1] != USER_AUTH_SUCCEEDED {
        return Err(Socks5ConnectError::AuthFailed(rsp[1]));
    }
    Ok(())
}
