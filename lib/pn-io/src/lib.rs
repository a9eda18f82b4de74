/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

mod transport;
pub use transport::{RecvMode, Transport};

mod ext;
pub use ext::TransportExt;

#[cfg(any(test, feature = "mock"))]
pub mod mock;
