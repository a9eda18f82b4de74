/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use super::types::*;

const SOCKS5_VERSION: u8 = 0x05;

mod reply;
mod request;

pub use reply::Socks5Reply;
pub use request::{Socks5Request, encode_addr};

pub mod auth;
pub mod client;
