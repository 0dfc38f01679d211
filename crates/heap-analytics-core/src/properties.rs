// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Helper for building event and user properties.

use std::collections::HashMap;

use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::finite;

/// Free-form key/value metadata attached to an event or an identity.
///
/// Serializes as a plain JSON object. A value with no JSON representation
/// (a NaN or infinite float, a map with non-string keys) is remembered by
/// `insert` and makes serialization fail, so it is never sent as `null`.
///
/// # Example
///
/// ```
/// use heap_analytics_core::Properties;
///
/// let props = Properties::new()
///     .insert("plan", "enterprise")
///     .insert("seats", 25)
///     .insert("trial", false);
/// assert_eq!(props.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
	inner: Map<String, Value>,
	/// Keys whose value could not be encoded, with the reason.
	rejected: Vec<(String, String)>,
}

impl Properties {
	/// Creates an empty set of properties.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a key-value pair.
	///
	/// The value can be any serializable type: strings, numbers, booleans,
	/// arrays, maps and structs. Values JSON cannot represent are kept aside
	/// and reported when the properties are serialized.
	pub fn insert<K, V>(self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Serialize,
	{
		let key = key.into();
		match encode(&value) {
			Ok(value) => self.insert_value(key, value),
			Err(e) => self.reject(key, e.to_string()),
		}
	}

	/// Inserts a value, failing immediately when JSON cannot represent it.
	pub fn try_insert<K, V>(self, key: K, value: V) -> Result<Self, serde_json::Error>
	where
		K: Into<String>,
		V: Serialize,
	{
		let value = encode(&value)?;
		Ok(self.insert_value(key.into(), value))
	}

	fn insert_value(mut self, key: String, value: Value) -> Self {
		self.rejected.retain(|(k, _)| *k != key);
		self.inner.insert(key, value);
		self
	}

	fn reject(mut self, key: String, reason: String) -> Self {
		self.inner.remove(&key);
		self.rejected.retain(|(k, _)| *k != key);
		self.rejected.push((key, reason));
		self
	}

	/// Merges another set of properties into this one.
	///
	/// Keys present in both take the value from `other`.
	pub fn merge(mut self, other: Properties) -> Self {
		for (key, value) in other.inner {
			self = self.insert_value(key, value);
		}
		for (key, reason) in other.rejected {
			self = self.reject(key, reason);
		}
		self
	}

	/// True when there is nothing to send, rejected values included.
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty() && self.rejected.is_empty()
	}

	/// Number of encodable properties.
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Keys whose values could not be encoded.
	pub fn rejected_keys(&self) -> impl Iterator<Item = &str> {
		self.rejected.iter().map(|(k, _)| k.as_str())
	}

	/// Converts the encodable properties into a JSON object value.
	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

fn encode<V: Serialize + ?Sized>(value: &V) -> Result<Value, serde_json::Error> {
	finite::check(value)?;
	serde_json::to_value(value)
}

impl Serialize for Properties {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		if let Some((key, reason)) = self.rejected.first() {
			return Err(S::Error::custom(format!(
				"property `{key}` cannot be encoded: {reason}"
			)));
		}
		self.inner.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Properties {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Map::<String, Value>::deserialize(deserializer).map(Self::from)
	}
}

impl From<Properties> for Value {
	fn from(props: Properties) -> Self {
		props.into_value()
	}
}

impl From<Value> for Properties {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => map.into(),
			_ => Self::new(),
		}
	}
}

impl From<Map<String, Value>> for Properties {
	fn from(map: Map<String, Value>) -> Self {
		Self {
			inner: map,
			rejected: Vec::new(),
		}
	}
}

impl<K, V> From<HashMap<K, V>> for Properties
where
	K: Into<String>,
	V: Serialize,
{
	fn from(map: HashMap<K, V>) -> Self {
		map.into_iter().collect()
	}
}

impl<K, V> FromIterator<(K, V)> for Properties
where
	K: Into<String>,
	V: Serialize,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		iter.into_iter().fold(Self::new(), |props, (k, v)| props.insert(k, v))
	}
}
