/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use bytes::{BufMut, BytesMut};
use http::{HeaderName, HeaderValue};

use pn_types::net::{AddressError, TargetAddr};

pub struct HttpConnectRequest<'a> {
    host_port: String,
    static_headers: &'a [(HeaderName, HeaderValue)],
    dyn_headers: Vec<String>,
}

impl<'a> HttpConnectRequest<'a> {
    pub fn new(
        host: &TargetAddr,
        static_headers: &'a [(HeaderName, HeaderValue)],
    ) -> Result<Self, AddressError> {
        Ok(HttpConnectRequest {
            host_port: host.to_host_port()?,
            static_headers,
            dyn_headers: Vec::new(),
        })
    }

    /// the line should end with \r\n
    pub fn append_dyn_header(&mut self, line: String) {
        debug_assert!(line.ends_with("\r\n"));
        self.dyn_headers.push(line);
    }

    /// Encode the whole request, so it can be sent with a single write.
    pub fn encode(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        buf.put_slice(b"CONNECT ");
        buf.put_slice(self.host_port.as_bytes());
        buf.put_slice(b" HTTP/1.1\r\nHost: ");
        buf.put_slice(self.host_port.as_bytes());
        buf.put_slice(b"\r\n");
        for line in &self.dyn_headers {
            buf.put_slice(line.as_bytes());
        }
        for (name, value) in self.static_headers {
            buf.put_slice(name.as_str().as_bytes());
            buf.put_slice(b": ");
            buf.put_slice(value.as_bytes());
            buf.put_slice(b"\r\n");
        }
        buf.put_slice(b"\r\n");
        buf
    }

    fn encoded_len(&self) -> usize {
        let dyn_len: usize = self.dyn_headers.iter().map(|l| l.len()).sum();
        let static_len: usize = self
            .static_headers
            .iter()
            .map(|(n, v)| n.as_str().len() + v.len() + 4)
            .sum();
        // CONNECT {} HTTP/1.1\r\nHost: {}\r\n ... \r\n
        8 + 11 + 6 + 2 + self.host_port.len() * 2 + dyn_len + static_len + 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv6Addr};

    #[test]
    fn no_auth() {
        let addr = TargetAddr::from_domain_and_port("example.com", 443).unwrap();
        let req = HttpConnectRequest::new(&addr, &[]).unwrap();
        let buf = req.encode();
        assert_eq!(
            buf.as_ref(),
            b"CONNECT example.com:443 HTTP/1.1\r\nHost: example.com:443\r\n\r\n"
        );
        assert_eq!(buf.len(), req.encoded_len());
    }

    #[test]
    fn ipv6() {
        let addr = TargetAddr::from_ip_and_port(IpAddr::V6(Ipv6Addr::LOCALHOST), 8443);
        let req = HttpConnectRequest::new(&addr, &[]).unwrap();
        assert_eq!(
            req.encode().as_ref(),
            b"CONNECT [::1]:8443 HTTP/1.1\r\nHost: [::1]:8443\r\n\r\n"
        );
    }

    #[test]
    fn with_headers() {
        let addr = TargetAddr::from_domain_and_port("example.com", 443).unwrap();
        let static_headers = vec![(
            HeaderName::from_static("user-agent"),
            HeaderValue::from_static("pnego"),
        )];
        let mut req = HttpConnectRequest::new(&addr, &static_headers).unwrap();
        req.append_dyn_header("Proxy-Authorization: Basic dTpw\r\n".to_string());
        let buf = req.encode();
        assert_eq!(
            buf.as_ref(),
            b"CONNECT example.com:443 HTTP/1.1\r\n\
              Host: example.com:443\r\n\
              Proxy-Authorization: Basic dTpw\r\n\
              user-agent: pnego\r\n\
              \r\n"
        );
        assert_eq!(buf.len(), req.encoded_len());
    }

    #[test]
    fn invalid_addr() {
        let addr = TargetAddr::new(pn_types::net::Host::Domain("x".repeat(256)), 443);
        assert!(HttpConnectRequest::new(&addr, &[]).is_err());
    }
}
