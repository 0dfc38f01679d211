// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Payload types for the Heap analytics ingestion API.
//!
//! This crate holds the JSON shapes sent by the SDK and nothing else. It
//! performs no I/O, which keeps it usable from mock servers and tests.

pub mod event;
mod finite;
pub mod properties;

pub use event::Event;
pub use properties::Properties;

/// Default base URL of the Heap ingestion API.
pub const DEFAULT_BASE_URL: &str = "https://heapanalytics.com";

/// Default path for track events.
pub const DEFAULT_TRACK_PATH: &str = "/api/track";

/// Default path for adding user properties.
pub const DEFAULT_USER_PROPERTIES_PATH: &str = "/api/add_user_properties";

/// Content type of every request body.
pub const CONTENT_TYPE: &str = "application/json";
