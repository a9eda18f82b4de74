/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod error;
pub use error::AddressError;

mod host;
pub use host::Host;

mod target;
pub use target::{DOMAIN_MAX_LENGTH, TargetAddr};
