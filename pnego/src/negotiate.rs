/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use socket2::SockAddr;

use pn_http::connect::http_connect_to;
use pn_io::Transport;
use pn_socks::v5::client::socks5_connect_to;
use pn_types::auth::Credentials;
use pn_types::net::TargetAddr;

use crate::{NegotiationConfig, NegotiationError, NegotiationOutcome, ProtocolSelection};

#[derive(Clone, Debug)]
pub struct Negotiator {
    protocol: ProtocolSelection,
    config: NegotiationConfig,
}

impl Negotiator {
    pub fn new(protocol: ProtocolSelection) -> Self {
        Negotiator::with_config(protocol, NegotiationConfig::default())
    }

    pub fn with_config(protocol: ProtocolSelection, config: NegotiationConfig) -> Self {
        Negotiator { protocol, config }
    }

    #[inline]
    pub fn protocol(&self) -> ProtocolSelection {
        self.protocol
    }

    /// Negotiate a tunnel to `target` on a stream already connected to the
    /// upstream proxy.
    ///
    /// On success all bytes of the proxy reply have been consumed, and the
    /// stream can be used to talk to the target directly. On failure the
    /// stream is left in an unspecified state and should be closed.
    pub fn negotiate<T>(
        &self,
        stream: &mut T,
        target: &TargetAddr,
        auth: Option<&Credentials>,
    ) -> NegotiationOutcome
    where
        T: Transport + ?Sized,
    {
        log::debug!("start {} negotiation to {target}", self.protocol);
        let r = match self.protocol {
            ProtocolSelection::Socks5 => {
                socks5_connect_to(stream, &self.config.socks5, auth, target)
                    .map(|_| ())
                    .map_err(NegotiationError::from)
            }
            ProtocolSelection::HttpConnect => {
                http_connect_to(stream, &self.config.http, auth, target)
                    .map_err(NegotiationError::from)
            }
        };
        match &r {
            Ok(_) => log::debug!("{} negotiation to {target} done", self.protocol),
            Err(e) => log::debug!("{} negotiation to {target} failed: {e}", self.protocol),
        }
        r
    }

    /// Same as [`Negotiator::negotiate`], with the target taken from a
    /// native socket address.
    pub fn negotiate_sockaddr<T>(
        &self,
        stream: &mut T,
        target: &SockAddr,
        auth: Option<&Credentials>,
    ) -> NegotiationOutcome
    where
        T: Transport + ?Sized,
    {
        let target = TargetAddr::try_from(target)?;
        self.negotiate(stream, &target, auth)
    }
}

/// Negotiate with the default config.
pub fn negotiate<T>(
    stream: &mut T,
    protocol: ProtocolSelection,
    target: &TargetAddr,
    auth: Option<&Credentials>,
) -> NegotiationOutcome
where
    T: Transport + ?Sized,
{
    Negotiator::new(protocol).negotiate(stream, target, auth)
}

pub fn negotiate_sockaddr<T>(
    stream: &mut T,
    protocol: ProtocolSelection,
    target: &SockAddr,
    auth: Option<&Credentials>,
) -> NegotiationOutcome
where
    T: Transport + ?Sized,
{
    Negotiator::new(protocol).negotiate_sockaddr(stream, target, auth)
}
