/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::borrow::Cow;

use atoi::FromRadix10;

use super::HttpLineParseError;

pub struct HttpStatusLine<'a> {
    /// the minor version in `HTTP/1.x`
    pub version: u8,
    pub code: u16,
    /// bytes that are not valid utf-8 are replaced
    pub reason: Cow<'a, str>,
}

impl<'a> HttpStatusLine<'a> {
    /// Parse a `HTTP/1.x XYZ [reason]` status line.
    ///
    /// Only the first line of `buf` is looked at.
    pub fn parse(buf: &'a [u8]) -> Result<HttpStatusLine<'a>, HttpLineParseError> {
        const MINIMAL_LENGTH: usize = 12; // HTTP/1.x XYZ
        const VERSION_PREFIX: &[u8] = b"HTTP/1.";

        let line = match memchr::memchr(b'\n', buf) {
            Some(p) => &buf[..p],
            None => buf,
        };
        if line.len() < MINIMAL_LENGTH {
            return Err(HttpLineParseError::NotLongEnough);
        }

        if !line.starts_with(VERSION_PREFIX) {
            return Err(HttpLineParseError::InvalidVersion);
        }
        let v = line[VERSION_PREFIX.len()];
        if !v.is_ascii_digit() {
            return Err(HttpLineParseError::InvalidVersion);
        }
        let version = v - b'0';

        if line[8] != b' ' {
            return Err(HttpLineParseError::NoDelimiterFound(' '));
        }

        // at most 4 digits, so the code won't overflow
        let left = &line[9..];
        let (code, len) = u16::from_radix_10(&left[..left.len().min(4)]);
        if len != 3 {
            return Err(HttpLineParseError::InvalidStatusCode);
        }

        let reason = match &left[3..] {
            [] | [b'\r'] => Cow::Borrowed(""),
            [b' ', reason @ ..] => String::from_utf8_lossy(reason.trim_ascii()),
            _ => return Err(HttpLineParseError::InvalidStatusCode),
        };

        Ok(HttpStatusLine {
            version,
            code,
            reason,
        })
    }
}
