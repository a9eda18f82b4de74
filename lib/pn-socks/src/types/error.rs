/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

use pn_types::net::AddressError;

use super::SocksAuthMethod;
use crate::v5::Socks5Reply;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocksNegotiationError {
    #[error("invalid version code {0:#04x}")]
    InvalidVersion(u8),
    #[error("invalid addr type {0:#04x}")]
    InvalidAddrType(u8),
}

#[derive(Error, Debug)]
pub enum SocksReplyParseError {
    #[error("read failed: {0:?}")]
    ReadFailed(#[from] io::Error),
    #[error("invalid socks protocol: {0}")]
    InvalidProtocol(#[from] SocksNegotiationError),
}

#[derive(Error, Debug)]
pub enum Socks5ConnectError {
    #[error("invalid target address: {0}")]
    InvalidAddress(#[from] AddressError),
    #[error("read failed: {0:?}")]
    ReadFailed(io::Error),
    #[error("write failed: {0:?}")]
    WriteFailed(io::Error),
    #[error("auth method {0} selected by server was not offered")]
    MethodNotAccepted(SocksAuthMethod),
    #[error("unsupported auth version {0:#04x}")]
    UnsupportedAuthVersion(u8),
    #[error("auth failed with status {0:#04x}")]
    AuthFailed(u8),
    #[error("invalid socks protocol: {0}")]
    InvalidProtocol(#[from] SocksNegotiationError),
    #[error("request failed: {0}")]
    RequestFailed(Socks5Reply),
}

impl From<SocksReplyParseError> for Socks5ConnectError {
    fn from(e: SocksReplyParseError) -> Self {
        match e {
            SocksReplyParseError::ReadFailed(e) => Socks5ConnectError::ReadFailed(e),
            SocksReplyParseError::InvalidProtocol(e) => Socks5ConnectError::InvalidProtocol(e),
        }
    }
}
