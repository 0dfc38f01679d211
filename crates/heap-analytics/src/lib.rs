// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rust SDK for the Heap analytics ingestion API.
//!
//! Two operations are exposed: [`HeapClient::track`] records a named event for
//! an identity, and [`HeapClient::user_properties`] attaches properties to an
//! identity. Every call is one JSON POST; there is no queue, batching or
//! retry.
//!
//! # Example
//!
//! ```ignore
//! use heap_analytics::{HeapClient, Properties};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), heap_analytics::HeapError> {
//!     let http = reqwest::Client::new();
//!     let client = HeapClient::builder("11").http_client(http).build();
//!
//!     client
//!         .track(
//!             "my@identifier.net",
//!             "test_event",
//!             Properties::new().insert("test_prop", "test_val"),
//!         )
//!         .await?;
//!
//!     client
//!         .user_properties("my@identifier.net", Properties::new().insert("plan", "pro"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `blocking`: adds [`blocking::HeapClient`] built on `reqwest::blocking`.

#[cfg(feature = "blocking")]
pub mod blocking;
mod client;
mod error;

pub use client::{ClientConfig, HeapClient, HeapClientBuilder};
pub use error::{HeapError, ResponseBody, Result};

// Re-export core types for convenience
pub use heap_analytics_core::{
	Event, Properties, CONTENT_TYPE, DEFAULT_BASE_URL, DEFAULT_TRACK_PATH,
	DEFAULT_USER_PROPERTIES_PATH,
};
