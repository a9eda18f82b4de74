/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::net::SocketAddr;

use pn_io::{Transport, TransportExt};
use pn_types::auth::Credentials;
use pn_types::net::TargetAddr;

use super::auth::SocksAuthMethods;
use super::{Socks5ConnectError, Socks5Reply, Socks5Request, SocksAuthMethod, auth};

#[derive(Clone, Copy, Debug)]
pub struct Socks5ClientConfig {
    /// also offer the no-auth method when credentials are available
    pub offer_no_auth_with_user: bool,
}

impl Default for Socks5ClientConfig {
    fn default() -> Self {
        Socks5ClientConfig {
            offer_no_auth_with_user: true,
        }
    }
}

impl Socks5ClientConfig {
    fn auth_methods(&self, auth: Option<&Credentials>) -> SocksAuthMethods {
        let mut methods = SocksAuthMethods::new();
        match auth {
            Some(_) => {
                if self.offer_no_auth_with_user {
                    methods.push(SocksAuthMethod::None);
                }
                methods.push(SocksAuthMethod::User);
            }
            None => methods.push(SocksAuthMethod::None),
        }
        methods
    }
}

fn socks5_login<T>(
    stream: &mut T,
    config: &Socks5ClientConfig,
    auth: Option<&Credentials>,
) -> Result<(), Socks5ConnectError>
where
    T: Transport + ?Sized,
{
    let methods = config.auth_methods(auth);
    let auth_method = auth::send_and_recv_method(stream, &methods)?;
    match auth_method {
        SocksAuthMethod::None => {}
        SocksAuthMethod::User => {
            if let Some(c) = auth {
                auth::proceed_with_user(stream, &c.username, &c.password)?;
                log::debug!("socks5 user auth succeeded");
            } else {
                return Err(Socks5ConnectError::MethodNotAccepted(auth_method));
            }
        }
        _ => return Err(Socks5ConnectError::MethodNotAccepted(auth_method)),
    }

    Ok(())
}

/// tcp connect to a socks5 proxy
///
/// The target address is checked before anything is sent.
/// Return the local bind address at the server side.
pub fn socks5_connect_to<T>(
    stream: &mut T,
    config: &Socks5ClientConfig,
    auth: Option<&Credentials>,
    addr: &TargetAddr,
) -> Result<SocketAddr, Socks5ConnectError>
where
    T: Transport + ?Sized,
{
    let req = Socks5Request::tcp_connect(addr)?;

    socks5_login(stream, config, auth)?;

    stream
        .send_all_once(req.as_bytes())
        .map_err(Socks5ConnectError::WriteFailed)?;
    log::debug!("socks5 connect request to {addr} sent");

    let rsp = Socks5Reply::recv(stream)?;
    match rsp {
        Socks5Reply::Succeeded(bind_addr) => {
            log::debug!("socks5 connect to {addr} succeeded, bind address {bind_addr}");
            Ok(bind_addr)
        }
        _ => {
            log::debug!("socks5 connect to {addr} failed: {rsp}");
            Err(Socks5ConnectError::RequestFailed(rsp))
        }
    }
}
