// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Default transport for the Heap SDK clients.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// SDK name reported in the User-Agent.
pub const SDK_NAME: &str = "heap-analytics-rust";

/// SDK version reported in the User-Agent.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The transport a `HeapClient` uses when none is supplied.
///
/// No timeout is set; a call waits as long as the server does.
pub fn new_client() -> Client {
	configured(None)
}

/// Same as [`new_client`], bounded by `timeout` per request.
///
/// This is what `HeapClientBuilder::request_timeout` produces:
/// ```ignore
/// let client = HeapClient::builder("11")
///     .request_timeout(Duration::from_secs(5))
///     .build();
/// ```
pub fn new_client_with_timeout(timeout: Duration) -> Client {
	configured(Some(timeout))
}

/// A reqwest builder carrying the SDK User-Agent.
///
/// Start here to hand a customized transport to `HeapClientBuilder::http_client`.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

fn configured(timeout: Option<Duration>) -> Client {
	let builder = match timeout {
		Some(timeout) => builder().timeout(timeout),
		None => builder(),
	};
	// Only fails when the TLS backend cannot initialize.
	builder.build().expect("failed to build HTTP client")
}

/// `heap-analytics-rust/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"{}/{} ({}-{})",
		SDK_NAME,
		SDK_VERSION,
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

/// Blocking counterparts of the transport constructors.
#[cfg(feature = "blocking")]
pub mod blocking {
	use reqwest::blocking::{Client, ClientBuilder};
	use std::time::Duration;

	/// Must not be called from within an async runtime.
	pub fn new_client() -> Client {
		configured(None)
	}

	pub fn new_client_with_timeout(timeout: Duration) -> Client {
		configured(Some(timeout))
	}

	pub fn builder() -> ClientBuilder {
		Client::builder().user_agent(super::user_agent())
	}

	fn configured(timeout: Option<Duration>) -> Client {
		let builder = match timeout {
			Some(timeout) => builder().timeout(timeout),
			None => builder(),
		};
		builder.build().expect("failed to build HTTP client")
	}
}
