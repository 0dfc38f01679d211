// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Heap analytics SDK.

use std::fmt;

use thiserror::Error;

/// Heap analytics SDK errors.
#[derive(Debug, Error)]
pub enum HeapError {
	/// The event could not be converted to JSON.
	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	/// The POST could not be completed (connect, DNS, TLS, timeout).
	#[error("HTTP request failed: {0}")]
	Transport(#[from] reqwest::Error),

	/// The server answered with something other than 200.
	#[error("expected 200 (OK) but got {status}{body}")]
	UnexpectedStatus { status: u16, body: ResponseBody },
}

impl HeapError {
	/// Returns the HTTP status for `UnexpectedStatus`, `None` otherwise.
	pub fn status(&self) -> Option<u16> {
		match self {
			HeapError::UnexpectedStatus { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Diagnostic body of a non-200 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
	/// The raw body text.
	Text(String),
	/// Reading the body failed; holds the read error.
	Unreadable(String),
}

impl fmt::Display for ResponseBody {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResponseBody::Text(text) => write!(f, " ({text})"),
			ResponseBody::Unreadable(reason) => {
				write!(f, ", could not read response body: {reason}")
			}
		}
	}
}

/// Result type alias for Heap operations.
pub type Result<T> = std::result::Result<T, HeapError>;
