/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

//! Tunnel negotiation with an upstream proxy.
//!
//! Given a socket that is already connected to a SOCKS5 or HTTP proxy, run
//! the protocol handshake so that anything written to the socket afterwards
//! is forwarded to the target address.
//!
//! Everything is blocking and done on the caller's thread. Set read/write
//! timeouts on the socket if the proxy may stop responding.

mod config;
pub use config::{NegotiationConfig, ProtocolSelection};

mod error;
pub use error::{NegotiationError, NegotiationOutcome};

mod negotiate;
pub use negotiate::{Negotiator, negotiate, negotiate_sockaddr};

pub use pn_io::{RecvMode, Transport};
pub use pn_types::auth::{CredentialError, Credentials, Password, Username};
pub use pn_types::net::{AddressError, Host, TargetAddr};
