/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::str::FromStr;

use http::{HeaderName, HeaderValue};

use pn_http::connect::HttpConnectConfig;
use pn_socks::v5::client::Socks5ClientConfig;

/// The protocol to talk to the upstream proxy, chosen by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProtocolSelection {
    Socks5,
    HttpConnect,
}

impl ProtocolSelection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProtocolSelection::Socks5 => "socks5",
            ProtocolSelection::HttpConnect => "http",
        }
    }
}

impl fmt::Display for ProtocolSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolSelection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "socks5" | "socks" => Ok(ProtocolSelection::Socks5),
            "http" | "http_connect" | "connect" => Ok(ProtocolSelection::HttpConnect),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NegotiationConfig {
    pub(crate) socks5: Socks5ClientConfig,
    pub(crate) http: HttpConnectConfig,
}

impl NegotiationConfig {
    /// Max size of the HTTP CONNECT response header, 1024 by default.
    pub fn set_http_max_header_size(&mut self, size: usize) {
        self.http.max_header_size = size;
    }

    pub fn http_max_header_size(&self) -> usize {
        self.http.max_header_size
    }

    pub fn append_http_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.http.append_header(name, value);
    }

    /// Whether to offer the no-auth method along with username/password
    /// when credentials are present. Enabled by default.
    pub fn set_socks5_offer_no_auth_with_user(&mut self, offer: bool) {
        self.socks5.offer_no_auth_with_user = offer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_from_str() {
        assert_eq!(
            ProtocolSelection::from_str("SOCKS5"),
            Ok(ProtocolSelection::Socks5)
        );
        assert_eq!(
            ProtocolSelection::from_str("http"),
            Ok(ProtocolSelection::HttpConnect)
        );
        assert!(ProtocolSelection::from_str("socks4").is_err());
        assert_eq!(ProtocolSelection::HttpConnect.to_string(), "http");
    }

    #[test]
    fn default_config() {
        let config = NegotiationConfig::default();
        assert_eq!(config.http_max_header_size(), 1024);
        assert!(config.socks5.offer_no_auth_with_user);
        assert!(config.http.static_headers().is_empty());
    }
}
