/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use super::CredentialError;

const USERNAME_MAX_LENGTH: usize = u8::MAX as usize;
const PASSWORD_MAX_LENGTH: usize = u8::MAX as usize;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Username {
    inner: String,
    len: u8,
}

impl Username {
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn from_original(s: &str) -> Result<Self, CredentialError> {
        if s.is_empty() {
            return Err(CredentialError::EmptyUsername);
        }
        if s.len() > USERNAME_MAX_LENGTH {
            return Err(CredentialError::UsernameTooLong(s.len()));
        }
        Ok(Username {
            inner: s.to_string(),
            len: s.len() as u8,
        })
    }

    pub fn as_original(&self) -> &str {
        &self.inner
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Password {
    inner: String,
    len: u8,
}

impl Password {
    pub fn empty() -> Self {
        Password {
            inner: String::new(),
            len: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn from_original(s: &str) -> Result<Self, CredentialError> {
        if s.len() > PASSWORD_MAX_LENGTH {
            return Err(CredentialError::PasswordTooLong(s.len()));
        }
        Ok(Password {
            inner: s.to_string(),
            len: s.len() as u8,
        })
    }

    pub fn as_original(&self) -> &str {
        &self.inner
    }
}

/// A username and password pair offered to the upstream proxy.
///
/// Not having one at all means no authentication will be offered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Credentials {
    pub username: Username,
    pub password: Password,
}

impl Credentials {
    pub fn new(username: Username, password: Password) -> Self {
        Credentials { username, password }
    }

    pub fn from_original(username: &str, password: &str) -> Result<Self, CredentialError> {
        Ok(Credentials {
            username: Username::from_original(username)?,
            password: Password::from_original(password)?,
        })
    }
}
