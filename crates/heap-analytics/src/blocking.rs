// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Blocking Heap client for callers without an async runtime.
//!
//! Same payloads, paths and errors as [`crate::HeapClient`]; each call blocks
//! the current thread until the response status is known. Do not use from
//! inside an async runtime.

use std::sync::Arc;
use std::time::Duration;

use heap_analytics_core::{Event, Properties, CONTENT_TYPE};
use heap_common_http::{SDK_NAME, SDK_VERSION};
use reqwest::blocking::Client;
use reqwest::header;
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::client::{unexpected_status, ClientConfig};
use crate::error::Result;

/// Builder for constructing a blocking HeapClient.
pub struct HeapClientBuilder {
	app_id: String,
	config: ClientConfig,
	http_client: Option<Client>,
	request_timeout: Option<Duration>,
}

impl HeapClientBuilder {
	pub fn new(app_id: impl Into<String>) -> Self {
		Self {
			app_id: app_id.into(),
			config: ClientConfig::default(),
			http_client: None,
			request_timeout: None,
		}
	}

	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.config.set_base_url(url);
		self
	}

	pub fn track_path(mut self, path: impl Into<String>) -> Self {
		self.config.track_path = path.into();
		self
	}

	pub fn user_properties_path(mut self, path: impl Into<String>) -> Self {
		self.config.user_properties_path = path.into();
		self
	}

	pub fn http_client(mut self, client: Client) -> Self {
		self.http_client = Some(client);
		self
	}

	/// Ignored when a client is supplied with `http_client`.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);
		self
	}

	pub fn build(self) -> HeapClient {
		let http_client = match (self.http_client, self.request_timeout) {
			(Some(client), _) => client,
			(None, Some(timeout)) => heap_common_http::blocking::new_client_with_timeout(timeout),
			(None, None) => heap_common_http::blocking::new_client(),
		};

		info!(
			base_url = %self.config.base_url,
			sdk_name = SDK_NAME,
			sdk_version = SDK_VERSION,
			"Blocking Heap client initialized"
		);

		HeapClient {
			inner: Arc::new(HeapClientInner {
				app_id: self.app_id,
				config: self.config,
				http_client,
			}),
		}
	}
}

struct HeapClientInner {
	app_id: String,
	config: ClientConfig,
	http_client: Client,
}

/// Blocking client for the Heap ingestion API.
#[derive(Clone)]
pub struct HeapClient {
	inner: Arc<HeapClientInner>,
}

impl HeapClient {
	pub fn new(app_id: impl Into<String>) -> Self {
		HeapClientBuilder::new(app_id).build()
	}

	pub fn builder(app_id: impl Into<String>) -> HeapClientBuilder {
		HeapClientBuilder::new(app_id)
	}

	pub fn app_id(&self) -> &str {
		&self.inner.app_id
	}

	pub fn config(&self) -> &ClientConfig {
		&self.inner.config
	}

	/// Records `event` for `identity`.
	pub fn track(&self, identity: &str, event: &str, properties: impl Into<Properties>) -> Result<()> {
		let e = Event::new(&*self.inner.app_id, identity, event, properties.into());
		self.send(&e, &self.inner.config.track_path)
	}

	/// Adds or updates properties on `identity`.
	pub fn user_properties(&self, identity: &str, properties: impl Into<Properties>) -> Result<()> {
		let e = Event::new(&*self.inner.app_id, identity, "", properties.into());
		self.send(&e, &self.inner.config.user_properties_path)
	}

	fn send(&self, event: &Event, path: &str) -> Result<()> {
		let body = event.to_json()?;
		let url = format!("{}{}", self.inner.config.base_url, path);

		debug!(url = %url, identity = %event.identity, event = %event.event, "Sending event to Heap");

		let response = self
			.inner
			.http_client
			.post(&url)
			.header(header::CONTENT_TYPE, CONTENT_TYPE)
			.body(body)
			.send()?;

		let status = response.status();
		if status == StatusCode::OK {
			return Ok(());
		}

		Err(unexpected_status(status.as_u16(), response.text()))
	}
}
