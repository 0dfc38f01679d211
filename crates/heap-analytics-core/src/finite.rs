// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rejects NaN and infinite floats anywhere inside a serializable value.
//!
//! serde_json writes non-finite floats as `null`, so they have to be caught
//! before conversion. This serializer walks the value, discards everything
//! else and fails on the first non-finite float.

use serde::ser::{self, Error as _, Serialize};

pub(crate) fn check<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
	value.serialize(FiniteCheck)
}

fn check_float(v: f64) -> Result<(), serde_json::Error> {
	if v.is_finite() {
		Ok(())
	} else {
		Err(serde_json::Error::custom(format!(
			"float {v} cannot be represented in JSON"
		)))
	}
}

struct FiniteCheck;

type Res = Result<(), serde_json::Error>;

impl ser::Serializer for FiniteCheck {
	type Ok = ();
	type Error = serde_json::Error;
	type SerializeSeq = Self;
	type SerializeTuple = Self;
	type SerializeTupleStruct = Self;
	type SerializeTupleVariant = Self;
	type SerializeMap = Self;
	type SerializeStruct = Self;
	type SerializeStructVariant = Self;

	fn serialize_f32(self, v: f32) -> Res {
		check_float(v.into())
	}

	fn serialize_f64(self, v: f64) -> Res {
		check_float(v)
	}

	fn serialize_bool(self, _: bool) -> Res {
		Ok(())
	}

	fn serialize_i8(self, _: i8) -> Res {
		Ok(())
	}

	fn serialize_i16(self, _: i16) -> Res {
		Ok(())
	}

	fn serialize_i32(self, _: i32) -> Res {
		Ok(())
	}

	fn serialize_i64(self, _: i64) -> Res {
		Ok(())
	}

	fn serialize_i128(self, _: i128) -> Res {
		Ok(())
	}

	fn serialize_u8(self, _: u8) -> Res {
		Ok(())
	}

	fn serialize_u16(self, _: u16) -> Res {
		Ok(())
	}

	fn serialize_u32(self, _: u32) -> Res {
		Ok(())
	}

	fn serialize_u64(self, _: u64) -> Res {
		Ok(())
	}

	fn serialize_u128(self, _: u128) -> Res {
		Ok(())
	}

	fn serialize_char(self, _: char) -> Res {
		Ok(())
	}

	fn serialize_str(self, _: &str) -> Res {
		Ok(())
	}

	fn serialize_bytes(self, _: &[u8]) -> Res {
		Ok(())
	}

	fn serialize_none(self) -> Res {
		Ok(())
	}

	fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Res {
		value.serialize(self)
	}

	fn serialize_unit(self) -> Res {
		Ok(())
	}

	fn serialize_unit_struct(self, _: &'static str) -> Res {
		Ok(())
	}

	fn serialize_unit_variant(self, _: &'static str, _: u32, _: &'static str) -> Res {
		Ok(())
	}

	fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _: &'static str, value: &T) -> Res {
		value.serialize(self)
	}

	fn serialize_newtype_variant<T: Serialize + ?Sized>(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		value: &T,
	) -> Res {
		value.serialize(self)
	}

	fn serialize_seq(self, _: Option<usize>) -> Result<Self, serde_json::Error> {
		Ok(self)
	}

	fn serialize_tuple(self, _: usize) -> Result<Self, serde_json::Error> {
		Ok(self)
	}

	fn serialize_tuple_struct(self, _: &'static str, _: usize) -> Result<Self, serde_json::Error> {
		Ok(self)
	}

	fn serialize_tuple_variant(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		_: usize,
	) -> Result<Self, serde_json::Error> {
		Ok(self)
	}

	fn serialize_map(self, _: Option<usize>) -> Result<Self, serde_json::Error> {
		Ok(self)
	}

	fn serialize_struct(self, _: &'static str, _: usize) -> Result<Self, serde_json::Error> {
		Ok(self)
	}

	fn serialize_struct_variant(
		self,
		_: &'static str,
		_: u32,
		_: &'static str,
		_: usize,
	) -> Result<Self, serde_json::Error> {
		Ok(self)
	}
}

impl ser::SerializeSeq for FiniteCheck {
	type Ok = ();
	type Error = serde_json::Error;

	fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Res {
		check(value)
	}

	fn end(self) -> Res {
		Ok(())
	}
}

impl ser::SerializeTuple for FiniteCheck {
	type Ok = ();
	type Error = serde_json::Error;

	fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Res {
		check(value)
	}

	fn end(self) -> Res {
		Ok(())
	}
}

impl ser::SerializeTupleStruct for FiniteCheck {
	type Ok = ();
	type Error = serde_json::Error;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Res {
		check(value)
	}

	fn end(self) -> Res {
		Ok(())
	}
}

impl ser::SerializeTupleVariant for FiniteCheck {
	type Ok = ();
	type Error = serde_json::Error;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Res {
		check(value)
	}

	fn end(self) -> Res {
		Ok(())
	}
}

impl ser::SerializeMap for FiniteCheck {
	type Ok = ();
	type Error = serde_json::Error;

	fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Res {
		check(key)
	}

	fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Res {
		check(value)
	}

	fn end(self) -> Res {
		Ok(())
	}
}

impl ser::SerializeStruct for FiniteCheck {
	type Ok = ();
	type Error = serde_json::Error;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, _: &'static str, value: &T) -> Res {
		check(value)
	}

	fn end(self) -> Res {
		Ok(())
	}
}

impl ser::SerializeStructVariant for FiniteCheck {
	type Ok = ();
	type Error = serde_json::Error;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, _: &'static str, value: &T) -> Res {
		check(value)
	}

	fn end(self) -> Res {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde::Serialize;
	use std::collections::BTreeMap;

	#[derive(Serialize)]
	struct Metrics {
		label: &'static str,
		ratios: Vec<Option<f32>>,
	}

	#[test]
	fn test_finite_values_pass() {
		check(&1.5f64).unwrap();
		check(&"text").unwrap();
		check(&Metrics {
			label: "ok",
			ratios: vec![Some(0.5), None],
		})
		.unwrap();
	}

	#[test]
	fn test_top_level_non_finite_fails() {
		assert!(check(&f64::NAN).is_err());
		assert!(check(&f64::INFINITY).is_err());
		assert!(check(&f32::NEG_INFINITY).is_err());
	}

	#[test]
	fn test_nested_non_finite_fails() {
		let metrics = Metrics {
			label: "bad",
			ratios: vec![Some(0.5), Some(f32::NAN)],
		};
		assert!(check(&metrics).is_err());

		let mut map = BTreeMap::new();
		map.insert("inf", f64::INFINITY);
		let err = check(&map).unwrap_err();
		assert!(err.to_string().contains("cannot be represented in JSON"));
	}
}
