/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod auth;
pub use auth::SocksAuthMethod;

mod error;
pub use error::{Socks5ConnectError, SocksNegotiationError, SocksReplyParseError};
