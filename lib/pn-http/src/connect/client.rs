/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use http::{HeaderName, HeaderValue};

use pn_io::{Transport, TransportExt};
use pn_types::auth::Credentials;
use pn_types::net::TargetAddr;

use super::{HttpConnectError, HttpConnectRequest, HttpConnectResponse};

pub const DEFAULT_MAX_HEADER_SIZE: usize = 1024;

#[derive(Clone, Debug)]
pub struct HttpConnectConfig {
    pub max_header_size: usize,
    static_headers: Vec<(HeaderName, HeaderValue)>,
}

impl Default for HttpConnectConfig {
    fn default() -> Self {
        HttpConnectConfig {
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            static_headers: Vec::new(),
        }
    }
}

impl HttpConnectConfig {
    /// Extra header sent with every CONNECT request.
    pub fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.static_headers.push((name, value));
    }

    pub fn static_headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.static_headers
    }
}

pub fn http_connect_to<T>(
    stream: &mut T,
    config: &HttpConnectConfig,
    auth: Option<&Credentials>,
    addr: &TargetAddr,
) -> Result<(), HttpConnectError>
where
    T: Transport + ?Sized,
{
    let mut req = HttpConnectRequest::new(addr, &config.static_headers)?;

    if let Some(c) = auth {
        let line = crate::header::proxy_authorization_basic(&c.username, &c.password);
        req.append_dyn_header(line);
    }

    stream
        .send_all_once(req.encode().as_ref())
        .map_err(HttpConnectError::WriteFailed)?;
    log::debug!("http connect request to {addr} sent");

    match HttpConnectResponse::recv(stream, config.max_header_size) {
        Ok(rsp) => {
            log::debug!("http connect to {addr} succeeded: {} {}", rsp.code, rsp.reason);
            Ok(())
        }
        Err(e) => {
            log::debug!("http connect to {addr} failed: {e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect::HttpConnectResponseError;
    use pn_io::mock::Builder;
    use pn_types::net::{AddressError, Host};

    fn target() -> TargetAddr {
        TargetAddr::from_domain_and_port("example.com", 443).unwrap()
    }

    #[test]
    fn no_auth() {
        let mut stream = Builder::new()
            .write(b"CONNECT example.com:443 HTTP/1.1\r\nHost: example.com:443\r\n\r\n")
            .read(b"HTTP/1.1 200 Connection established\r\n\r\n")
            .build();
        http_connect_to(&mut stream, &HttpConnectConfig::default(), None, &target()).unwrap();
        assert!(stream.is_finished());
    }

    #[test]
    fn basic_auth() {
        let creds = Credentials::from_original("u", "p").unwrap();
        let mut stream = Builder::new()
            .write(
                b"CONNECT example.com:443 HTTP/1.1\r\n\
                  Host: example.com:443\r\n\
                  Proxy-Authorization: Basic dTpw\r\n\
                  \r\n",
            )
            .read(b"HTTP/1.1 200 OK\r\n\r\n")
            .build();
        http_connect_to(
            &mut stream,
            &HttpConnectConfig::default(),
            Some(&creds),
            &target(),
        )
        .unwrap();
    }

    #[test]
    fn auth_required() {
        let mut stream = Builder::new()
            .write(b"CONNECT example.com:443 HTTP/1.1\r\nHost: example.com:443\r\n\r\n")
            .read(b"HTTP/1.1 407 Proxy Authentication Required\r\n\r\n")
            .build();
        let e = http_connect_to(&mut stream, &HttpConnectConfig::default(), None, &target())
            .unwrap_err();
        assert!(matches!(e, HttpConnectError::UnexpectedStatusCode(407, _)));
    }

    #[test]
    fn never_ending_header() {
        let mut stream = Builder::new()
            .write(b"CONNECT example.com:443 HTTP/1.1\r\nHost: example.com:443\r\n\r\n")
            .read(&[b'A'; 4096])
            .build();
        let e = http_connect_to(&mut stream, &HttpConnectConfig::default(), None, &target())
            .unwrap_err();
        assert!(matches!(
            e,
            HttpConnectError::InvalidResponse(HttpConnectResponseError::TooLargeHeader(1024))
        ));
    }

    #[test]
    fn short_write() {
        let mut stream = Builder::new().short_write(10).build();
        let e = http_connect_to(&mut stream, &HttpConnectConfig::default(), None, &target())
            .unwrap_err();
        assert!(matches!(e, HttpConnectError::WriteFailed(_)));
    }

    #[test]
    fn too_long_domain() {
        let addr = TargetAddr::new(Host::Domain("a".repeat(256)), 443);
        let mut stream = Builder::new().build();
        let e = http_connect_to(&mut stream, &HttpConnectConfig::default(), None, &addr)
            .unwrap_err();
        assert!(matches!(
            e,
            HttpConnectError::InvalidAddress(AddressError::DomainTooLong(256))
        ));
        assert!(stream.written().is_empty());
    }

    #[test]
    fn extra_header() {
        let mut config = HttpConnectConfig::default();
        config.append_header(
            HeaderName::from_static("proxy-connection"),
            HeaderValue::from_static("keep-alive"),
        );
        let mut stream = Builder::new()
            .write(
                b"CONNECT example.com:443 HTTP/1.1\r\n\
                  Host: example.com:443\r\n\
                  proxy-connection: keep-alive\r\n\
                  \r\n",
            )
            .read(b"HTTP/1.1 200 OK\r\n\r\n")
            .build();
        http_connect_to(&mut stream, &config, None, &target()).unwrap();
    }
}
