// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Heap API client for track and user-properties calls.

use std::sync::Arc;
use std::time::Duration;

use heap_analytics_core::{
	Event, Properties, CONTENT_TYPE, DEFAULT_BASE_URL, DEFAULT_TRACK_PATH,
	DEFAULT_USER_PROPERTIES_PATH,
};
use heap_common_http::{SDK_NAME, SDK_VERSION};
use reqwest::header;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info};

use crate::error::{HeapError, ResponseBody, Result};

/// Endpoint configuration for a Heap client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	/// Base URL of the API, without a trailing slash.
	pub base_url: String,
	/// Path for track events.
	pub track_path: String,
	/// Path for adding user properties.
	pub user_properties_path: String,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			track_path: DEFAULT_TRACK_PATH.to_string(),
			user_properties_path: DEFAULT_USER_PROPERTIES_PATH.to_string(),
		}
	}
}

impl ClientConfig {
	pub(crate) fn set_base_url(&mut self, url: impl Into<String>) {
		self.base_url = url.into().trim_end_matches('/').to_string();
	}

	pub fn track_url(&self) -> String {
		format!("{}{}", self.base_url, self.track_path)
	}

	pub fn user_properties_url(&self) -> String {
		format!("{}{}", self.base_url, self.user_properties_path)
	}
}

/// Builder for constructing a HeapClient.
///
/// Setters apply in call order; calling one twice keeps the last value.
pub struct HeapClientBuilder {
	app_id: String,
	config: ClientConfig,
	http_client: Option<Client>,
	request_timeout: Option<Duration>,
}

impl HeapClientBuilder {
	/// Creates a new builder with default settings.
	pub fn new(app_id: impl Into<String>) -> Self {
		Self {
			app_id: app_id.into(),
			config: ClientConfig::default(),
			http_client: None,
			request_timeout: None,
		}
	}

	/// Sets the base URL of the Heap API.
	///
	/// Example: `https://heapanalytics.com`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.config.set_base_url(url);
		self
	}

	/// Sets the path used by `track`.
	pub fn track_path(mut self, path: impl Into<String>) -> Self {
		self.config.track_path = path.into();
		self
	}

	/// Sets the path used by `user_properties`.
	pub fn user_properties_path(mut self, path: impl Into<String>) -> Self {
		self.config.user_properties_path = path.into();
		self
	}

	/// Uses the given HTTP client instead of building one.
	///
	/// Pass a clone of one client to several SDK clients to share its
	/// connection pool.
	pub fn http_client(mut self, client: Client) -> Self {
		self.http_client = Some(client);
		self
	}

	/// Sets a request timeout on the default HTTP client.
	///
	/// Ignored when a client is supplied with `http_client`.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);
		self
	}

	/// Builds the HeapClient. Performs no network I/O.
	pub fn build(self) -> HeapClient {
		let http_client = match (self.http_client, self.request_timeout) {
			(Some(client), _) => client,
			(None, Some(timeout)) => heap_common_http::new_client_with_timeout(timeout),
			(None, None) => heap_common_http::new_client(),
		};

		info!(
			base_url = %self.config.base_url,
			sdk_name = SDK_NAME,
			sdk_version = SDK_VERSION,
			"Heap client initialized"
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

/// Internal client state.
struct HeapClientInner {
	app_id: String,
	config: ClientConfig,
	http_client: Client,
}

/// Client for the Heap ingestion API.
///
/// Each call issues exactly one POST and returns once the response status is
/// known. Nothing is queued or retried. Cloning is cheap and clones share
/// the same HTTP connection pool.
///
/// # Example
///
/// ```ignore
/// use heap_analytics::{HeapClient, Properties};
///
/// let client = HeapClient::new("11");
///
/// client
///     .track("my@identifier.net", "test_event", Properties::new().insert("test_prop", "test_val"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct HeapClient {
	inner: Arc<HeapClientInner>,
}

impl HeapClient {
	/// Creates a client with the default endpoint and HTTP client.
	pub fn new(app_id: impl Into<String>) -> Self {
		HeapClientBuilder::new(app_id).build()
	}

	/// Creates a new builder for constructing a HeapClient.
	pub fn builder(app_id: impl Into<String>) -> HeapClientBuilder {
		HeapClientBuilder::new(app_id)
	}

	pub fn app_id(&self) -> &str {
		&self.inner.app_id
	}

	pub fn config(&self) -> &ClientConfig {
		&self.inner.config
	}

	pub fn base_url(&self) -> &str {
		&self.inner.config.base_url
	}

	pub fn track_url(&self) -> String {
		self.inner.config.track_url()
	}

	pub fn user_properties_url(&self) -> String {
		self.inner.config.user_properties_url()
	}

	/// Records `event` for `identity`.
	pub async fn track(
		&self,
		identity: &str,
		event: &str,
		properties: impl Into<Properties>,
	) -> Result<()> {
		let e = Event::new(&*self.inner.app_id, identity, event, properties.into());
		self.send(&e, &self.inner.config.track_path).await
	}

	/// Adds or updates properties on `identity`.
	pub async fn user_properties(
		&self,
		identity: &str,
		properties: impl Into<Properties>,
	) -> Result<()> {
		let e = Event::new(&*self.inner.app_id, identity, "", properties.into());
		self.send(&e, &self.inner.config.user_properties_path).await
	}

	async fn send(&self, event: &Event, path: &str) -> Result<()> {
		let body = event.to_json()?;
		let url = format!("{}{}", self.inner.config.base_url, path);

		debug!(url = %url, identity = %event.identity, event = %event.event, "Sending event to Heap");

		let response = self
			.inner
			.http_client
			.post(&url)
			.header(header::CONTENT_TYPE, CONTENT_TYPE)
			.body(body)
			.send()
			.await?;

		let status = response.status();
		if status == StatusCode::OK {
			return Ok(());
		}

		Err(unexpected_status(status.as_u16(), response.text().await))
	}
}

/// Builds the error for a non-200 response from the outcome of reading its body.
pub(crate) fn unexpected_status(
	status: u16,
	body: std::result::Result<String, reqwest::Error>,
) -> HeapError {
	let body = match body {
		Ok(text) => ResponseBody::Text(text),
		Err(e) => ResponseBody::Unreadable(e.to_string()),
	};
	error!(status, body = ?body, "Heap rejected request");
	HeapError::UnexpectedStatus { status, body }
}
