/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use anyhow::anyhow;

use super::{AddressError, Host};

pub const DOMAIN_MAX_LENGTH: usize = u8::MAX as usize;

/// The destination a proxy should tunnel to.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TargetAddr {
    host: Host,
    port: u16,
}

impl TargetAddr {
    pub fn new(host: Host, port: u16) -> Self {
        TargetAddr { host, port }
    }

    pub fn from_ip_and_port(ip: IpAddr, port: u16) -> Self {
        TargetAddr {
            host: Host::Ip(ip),
            port,
        }
    }

    /// The domain is kept verbatim. Names that can not be carried in a
    /// single length byte are rejected here.
    pub fn from_domain_and_port(domain: &str, port: u16) -> Result<Self, AddressError> {
        let host = Host::Domain(domain.to_string());
        host.check()?;
        Ok(TargetAddr { host, port })
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn check(&self) -> Result<(), AddressError> {
        self.host.check()
    }

    /// The `host:port` authority form, with ipv6 literals in square brackets.
    pub fn to_host_port(&self) -> Result<String, AddressError> {
        self.check()?;
        Ok(self.to_string())
    }
}

impl fmt::Display for TargetAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Host::Ip(IpAddr::V6(ip6)) => write!(f, "[{ip6}]:{}", self.port),
            Host::Ip(IpAddr::V4(ip4)) => write!(f, "{ip4}:{}", self.port),
            Host::Domain(domain) => write!(f, "{domain}:{}", self.port),
        }
    }
}

impl From<SocketAddr> for TargetAddr {
    fn from(addr: SocketAddr) -> Self {
        TargetAddr::from_ip_and_port(addr.ip(), addr.port())
    }
}

impl From<&SocketAddr> for TargetAddr {
    fn from(addr: &SocketAddr) -> Self {
        TargetAddr::from(*addr)
    }
}

#[cfg(feature = "socket2")]
impl TryFrom<&socket2::SockAddr> for TargetAddr {
    type Error = AddressError;

    fn try_from(addr: &socket2::SockAddr) -> Result<Self, Self::Error> {
        match addr.as_socket() {
            Some(addr) => Ok(TargetAddr::from(addr)),
            None => Err(AddressError::UnsupportedFamily(u16::from(addr.family()))),
        }
    }
}

impl FromStr for TargetAddr {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((host, port)) = s.rsplit_once(':') else {
            return Err(anyhow!("no port found in {s}"));
        };
        if host.contains(':') && !host.starts_with('[') {
            return Err(anyhow!("ipv6 address should be enclosed in square brackets"));
        }
        let port = u16::from_str(port).map_err(|e| anyhow!("invalid port {port}: {e}"))?;
        let host = Host::from_str(host)?;
        Ok(TargetAddr { host, port })
    }
}
