/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::io;

use thiserror::Error;

use pn_types::net::AddressError;

use crate::HttpLineParseError;

#[derive(Debug, Error)]
pub enum HttpConnectResponseError {
    #[error("too large header, should be less than {0}")]
    TooLargeHeader(usize),
    #[error("invalid status line: {0}")]
    InvalidStatusLine(HttpLineParseError),
}

#[derive(Debug, Error)]
pub enum HttpConnectError {
    #[error("invalid target address: {0}")]
    InvalidAddress(#[from] AddressError),
    #[error("remote closed")]
    RemoteClosed,
    #[error("read failed: {0:?}")]
    ReadFailed(io::Error),
    #[error("write failed: {0:?}")]
    WriteFailed(io::Error),
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] HttpConnectResponseError),
    #[error("unexpected status code {0} {1}")]
    UnexpectedStatusCode(u16, String),
}
