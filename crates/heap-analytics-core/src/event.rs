// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The request body shared by the track and user-properties APIs.

use serde::{Deserialize, Serialize};

use crate::properties::Properties;

/// A single record sent to the Heap API.
///
/// `event` and `properties` are left out of the JSON entirely when empty. A
/// user-properties call is an `Event` with no event name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
	pub app_id: String,
	pub identity: String,
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub event: String,
	#[serde(default, skip_serializing_if = "Properties::is_empty")]
	pub properties: Properties,
}

impl Event {
	pub fn new(
		app_id: impl Into<String>,
		identity: impl Into<String>,
		event: impl Into<String>,
		properties: Properties,
	) -> Self {
		Self {
			app_id: app_id.into(),
			identity: identity.into(),
			event: event.into(),
			properties,
		}
	}

	/// Serializes the event into the wire format.
	pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
		serde_json::to_vec(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::Value;

	fn decode(event: &Event) -> Value {
		serde_json::from_slice(&event.to_json().unwrap()).unwrap()
	}

	#[test]
	fn test_new_event_sets_values() {
		let props = Properties::new()
			.insert("TestString", "This value")
			.insert("TestNumber", 10);

		let e = Event::new("testAppID", "testIdentity", "testEvent", props.clone());

		assert_eq!(e.app_id, "testAppID");
		assert_eq!(e.identity, "testIdentity");
		assert_eq!(e.event, "testEvent");
		assert_eq!(e.properties, props);
	}

	#[test]
	fn test_full_event_serializes_all_fields() {
		let e = Event::new(
			"11",
			"my@identifier.net",
			"test_event",
			Properties::new().insert("test_prop", "test_val"),
		);

		let body = decode(&e);
		assert_eq!(body["app_id"], "11");
		assert_eq!(body["identity"], "my@identifier.net");
		assert_eq!(body["event"], "test_event");
		assert_eq!(body["properties"]["test_prop"], "test_val");
	}

	#[test]
	fn test_empty_event_name_is_omitted() {
		let e = Event::new("app", "user", "", Properties::new().insert("plan", "pro"));

		let body = decode(&e);
		assert!(body.get("event").is_none());
		assert_eq!(body["properties"]["plan"], "pro");
	}

	#[test]
	fn test_empty_properties_are_omitted() {
		let e = Event::new("app", "user", "signup", Properties::new());

		let body = decode(&e);
		assert!(body.get("properties").is_none());
		assert_eq!(
			String::from_utf8(e.to_json().unwrap()).unwrap(),
			r#"{"app_id":"app","identity":"user","event":"signup"}"#
		);
	}

	#[test]
	fn test_non_finite_property_fails_to_serialize() {
		let e = Event::new("app", "user", "evt", Properties::new().insert("ratio", f64::NAN));

		let err = e.to_json().unwrap_err();
		assert!(err.to_string().contains("ratio"), "{err}");
	}

	#[test]
	fn test_sparse_body_deserializes_to_empty_fields() {
		let e: Event = serde_json::from_str(r#"{"app_id":"a","identity":"i"}"#).unwrap();
		assert!(e.event.is_empty());
		assert!(e.properties.is_empty());
	}

	proptest! {
		#[test]
		fn omitted_keys_match_emptiness(
			event in "[a-z_]{0,12}",
			keys in proptest::collection::vec("[a-z]{1,8}", 0..4),
		) {
			let props: Properties = keys.iter().map(|k| (k.clone(), 1)).collect();
			let e = Event::new("app", "user", event.clone(), props);
			let body = decode(&e);

			prop_assert_eq!(body.get("event").is_some(), !event.is_empty());
			prop_assert_eq!(body.get("properties").is_some(), !keys.is_empty());
		}
	}
}
