/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    #[error("empty username")]
    EmptyUsername,
    #[error("too long username ({0} bytes)")]
    UsernameTooLong(usize),
    #[error("too long password ({0} bytes)")]
    PasswordTooLong(usize),
}
