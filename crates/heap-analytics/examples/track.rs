// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: Send a track event and a user-properties update to Heap.
//!
//! Run with:
//!   HEAP_APP_ID=11 cargo run --example track -p heap-analytics

use heap_analytics::{HeapClient, Properties};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("heap_analytics=debug")),
		)
		.init();

	let app_id = std::env::var("HEAP_APP_ID").expect("HEAP_APP_ID environment variable required");
	let identity =
		std::env::var("HEAP_IDENTITY").unwrap_or_else(|_| "my@identifier.net".to_string());

	let mut builder = HeapClient::builder(&app_id);
	if let Ok(base_url) = std::env::var("HEAP_BASE_URL") {
		builder = builder.base_url(base_url);
	}
	let client = builder.build();

	println!("Sending track event to {}", client.track_url());
	client
		.track(
			&identity,
			"test_event",
			Properties::new().insert("test_prop", "test_val"),
		)
		.await?;
	println!("Event sent.");

	client
		.user_properties(&identity, Properties::new().insert("plan", "example"))
		.await?;
	println!("User properties sent.");

	Ok(())
}
