/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    #[error("too long domain name ({0} bytes)")]
    DomainTooLong(usize),
    #[error("unsupported address family {0}")]
    UnsupportedFamily(u16),
}
