/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use anyhow::anyhow;

use super::AddressError;
use super::target::DOMAIN_MAX_LENGTH;

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Host {
    Ip(IpAddr),
    /// the domain is sent as is, no resolving or idna conversion is done
    Domain(String),
}

impl Host {
    pub fn check(&self) -> Result<(), AddressError> {
        match self {
            Host::Ip(_) => Ok(()),
            Host::Domain(domain) => {
                if domain.len() > DOMAIN_MAX_LENGTH {
                    Err(AddressError::DomainTooLong(domain.len()))
                } else {
                    Ok(())
                }
            }
        }
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self, Host::Ip(IpAddr::V6(_)))
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Ip(ip) => write!(f, "{ip}"),
            Host::Domain(domain) => f.write_str(domain),
        }
    }
}

impl From<IpAddr> for Host {
    fn from(ip: IpAddr) -> Self {
        Host::Ip(ip)
    }
}

impl FromStr for Host {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(anyhow!("empty string"));
        }
        if let Some(v) = s.strip_prefix('[') {
            let Some(v) = v.strip_suffix(']') else {
                return Err(anyhow!("no closing square bracket found"));
            };
            return Ipv6Addr::from_str(v)
                .map(|ip6| Host::Ip(IpAddr::V6(ip6)))
                .map_err(|e| anyhow!("invalid ipv6 ip in squared brackets: {e}"));
        }
        if let Ok(ip) = IpAddr::from_str(s) {
            return Ok(Host::Ip(ip));
        }

        let host = Host::Domain(s.to_string());
        host.check()?;
        Ok(host)
    }
}
