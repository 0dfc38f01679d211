// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the Heap analytics SDK.
//!
//! This crate provides a pre-configured HTTP client with a consistent
//! User-Agent header. It is the default transport of every SDK client.

mod client;

#[cfg(feature = "blocking")]
pub use client::blocking;
pub use client::{
	builder, new_client, new_client_with_timeout, user_agent, SDK_NAME, SDK_VERSION,
};
