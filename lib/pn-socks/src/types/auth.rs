/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;

#[derive(Debug, Clone, Copy, PartialOrd, PartialEq, Ord, Eq)]
pub enum SocksAuthMethod {
    None,
    GssApi,
    User,
    Chap,
    OtherAssigned(u8),
    Private(u8),
    NoAcceptable,
}

impl SocksAuthMethod {
    pub const fn code(&self) -> u8 {
        match self {
            SocksAuthMethod::None => 0x00,
            SocksAuthMethod::GssApi => 0x01,
            SocksAuthMethod::User => 0x02,
            SocksAuthMethod::Chap => 0x03,
            SocksAuthMethod::OtherAssigned(v) => *v,
            SocksAuthMethod::Private(v) => *v,
            SocksAuthMethod::NoAcceptable => 0xFF,
        }
    }
}

impl fmt::Display for SocksAuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocksAuthMethod::None => f.write_str("None"),
            SocksAuthMethod::GssApi => f.write_str("GssApi"),
            SocksAuthMethod::User => f.write_str("User"),
            SocksAuthMethod::Chap => f.write_str("Chap"),
            SocksAuthMethod::OtherAssigned(v) => write!(f, "OtherAssigned({v})"),
            SocksAuthMethod::Private(v) => write!(f, "Private({v})"),
            SocksAuthMethod::NoAcceptable => f.write_str("NoAcceptable"),
        }
    }
}

impl From<u8> for SocksAuthMethod {
    fn from(method: u8) -> Self {
        match method {
            0x00 => Self::None,
            0x01 => Self::GssApi,
            0x02 => Self::User,
            0x03 => Self::Chap,
            v if method <= 0x7F => Self::OtherAssigned(v),
            v if method < 0xFF => Self::Private(v),
            _ => Self::NoAcceptable, // 0xFF
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code() {
        assert_eq!(SocksAuthMethod::from(0x02), SocksAuthMethod::User);
        assert_eq!(SocksAuthMethod::from(0x80), SocksAuthMethod::Private(0x80));
        assert_eq!(SocksAuthMethod::from(0xFF), SocksAuthMethod::NoAcceptable);
        assert_eq!(SocksAuthMethod::Private(0x80).code(), 0x80);
    }
}
