//! Converts an arbitrary `serde::Serialize` value into a [`Value`], the way
//! `serde_json::value::to_value` converts one into a `serde_json::Value`.
//!
//! Two marker newtype structs, [`Duration`] and [`Timestamp`], let an
//! embedder's `Serialize` impl opt a field into `Value::Duration` /
//! `Value::Timestamp` instead of falling through to the generic map/string
//! encoding chrono's own `Serialize` impls produce. This mirrors the
//! "magic newtype struct name" trick `serde_json` uses for arbitrary
//! precision numbers.

use std::fmt::{self, Display};

use serde::ser::{
	Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant, SerializeTuple,
	SerializeTupleStruct, SerializeTupleVariant, Serializer,
};

use crate::objects::{Key, MapValue, Value};

pub(crate) const DURATION_NEWTYPE_NAME: &str = "$cel::private::Duration";
pub(crate) const TIMESTAMP_NEWTYPE_NAME: &str = "$cel::private::Timestamp";

/// Wraps a [`chrono::Duration`] so it serializes into `Value::Duration`
/// rather than chrono's own `{secs, nanos}` struct form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Duration(pub chrono::Duration);

impl Serialize for Duration {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let nanos = self.0.num_nanoseconds().unwrap_or(i64::MAX);
		serializer.serialize_newtype_struct(DURATION_NEWTYPE_NAME, &nanos)
	}
}

/// Wraps a [`chrono::DateTime<chrono::FixedOffset>`] so it serializes into
/// `Value::Timestamp` rather than an RFC3339 string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp(pub chrono::DateTime<chrono::FixedOffset>);

impl Serialize for Timestamp {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_newtype_struct(TIMESTAMP_NEWTYPE_NAME, &self.0.to_rfc3339())
	}
}

/// An error raised while converting a `Serialize` value into a [`Value`].
#[derive(Clone, Debug, PartialEq)]
pub struct SerializationError(String);

impl Display for SerializationError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl std::error::Error for SerializationError {}

impl serde::ser::Error for SerializationError {
	fn custom<T: Display>(msg: T) -> Self {
		SerializationError(msg.to_string())
	}
}

/// Converts any `Serialize` value into a `Value<'static>`.
pub fn to_value<T: Serialize>(value: T) -> Result<Value<'static>, SerializationError> {
	value.serialize(ValueSerializer)
}

#[derive(Clone, Copy)]
struct ValueSerializer;

impl Serializer for ValueSerializer {
	type Ok = Value<'static>;
	type Error = SerializationError;

	type SerializeSeq = SeqSerializer;
	type SerializeTuple = SeqSerializer;
	type SerializeTupleStruct = SeqSerializer;
	type SerializeTupleVariant = SeqSerializer;
	type SerializeMap = MapSerializer;
	type SerializeStruct = MapSerializer;
	type SerializeStructVariant = MapSerializer;

	fn serialize_bool(self, v: bool) -> Result<Self::Ok, Self::Error> {
		Ok(Value::Bool(v))
	}

	fn serialize_i8(self, v: i8) -> Result<Self::Ok, Self::Error> {
		self.serialize_i64(v as i64)
	}
	fn serialize_i16(self, v: i16) -> Result<Self::Ok, Self::Error> {
		self.serialize_i64(v as i64)
	}
	fn serialize_i32(self, v: i32) -> Result<Self::Ok, Self::Error> {
		self.serialize_i64(v as i64)
	}
	fn serialize_i64(self, v: i64) -> Result<Self::Ok, Self::Error> {
		Ok(Value::Int(v))
	}

	fn serialize_u8(self, v: u8) -> Result<Self::Ok, Self::Error> {
		self.serialize_u64(v as u64)
	}
	fn serialize_u16(self, v: u16) -> Result<Self::Ok, Self::Error> {
		self.serialize_u64(v as u64)
	}
	fn serialize_u32(self, v: u32) -> Result<Self::Ok, Self::Error> {
		self.serialize_u64(v as u64)
	}
	fn serialize_u64(self, v: u64) -> Result<Self::Ok, Self::Error> {
		Ok(Value::UInt(v))
	}

	fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
		self.serialize_f64(v as f64)
	}
	fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
		Ok(Value::Float(v))
	}

	fn serialize_char(self, v: char) -> Result<Self::Ok, Self::Error> {
		let mut s = String::new();
		s.push(v);
		self.serialize_str(&s)
	}

	fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
		Ok(Value::from(v.to_string()))
	}

	fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
		Ok(Value::from(v.to_vec()))
	}

	fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
		Ok(Value::Null)
	}

	fn serialize_some<T>(self, value: &T) -> Result<Self::Ok, Self::Error>
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
		Ok(Value::Null)
	}

	fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
		Ok(Value::Null)
	}

	fn serialize_unit_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		variant: &'static str,
	) -> Result<Self::Ok, Self::Error> {
		Ok(Value::from(variant.to_string()))
	}

	fn serialize_newtype_struct<T>(
		self,
		name: &'static str,
		value: &T,
	) -> Result<Self::Ok, Self::Error>
	where
		T: ?Sized + Serialize,
	{
		if name == DURATION_NEWTYPE_NAME {
			let nanos = value.serialize(NanosSerializer)?;
			return Ok(Value::Duration(chrono::Duration::nanoseconds(nanos)));
		}
		if name == TIMESTAMP_NEWTYPE_NAME {
			let rfc3339 = value.serialize(RawStringSerializer)?;
			let ts = chrono::DateTime::parse_from_rfc3339(&rfc3339)
				.map_err(|e| SerializationError(format!("invalid timestamp {rfc3339:?}: {e}")))?;
			return Ok(Value::Timestamp(ts));
		}
		value.serialize(self)
	}

	fn serialize_newtype_variant<T>(
		self,
		_name: &'static str,
		_variant_index: u32,
		variant: &'static str,
		value: &T,
	) -> Result<Self::Ok, Self::Error>
	where
		T: ?Sized + Serialize,
	{
		let inner = value.serialize(self)?;
		Ok(Value::Map(MapValue::from(
			[(Key::from(variant), inner)].into_iter().collect::<std::collections::HashMap<_, _>>(),
		)))
	}

	fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
		Ok(SeqSerializer { items: Vec::with_capacity(len.unwrap_or(0)) })
	}

	fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
		self.serialize_seq(Some(len))
	}

	fn serialize_tuple_struct(
		self,
		_name: &'static str,
		len: usize,
	) -> Result<Self::SerializeTupleStruct, Self::Error> {
		self.serialize_seq(Some(len))
	}

	fn serialize_tuple_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		variant: &'static str,
		len: usize,
	) -> Result<Self::SerializeTupleVariant, Self::Error> {
		Ok(SeqSerializer { items: Vec::with_capacity(len) }.with_variant(variant))
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
		Ok(MapSerializer { entries: Vec::new(), pending_key: None, variant: None })
	}

	fn serialize_struct(
		self,
		_name: &'static str,
		len: usize,
	) -> Result<Self::SerializeStruct, Self::Error> {
		Ok(MapSerializer { entries: Vec::with_capacity(len), pending_key: None, variant: None })
	}

	fn serialize_struct_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		variant: &'static str,
		len: usize,
	) -> Result<Self::SerializeStructVariant, Self::Error> {
		Ok(MapSerializer {
			entries: Vec::with_capacity(len),
			pending_key: None,
			variant: Some(variant),
		})
	}
}

/// Extracted during `serialize_newtype_struct(DURATION_NEWTYPE_NAME, ...)`:
/// reduces the wrapped value straight to its `i64` nanosecond count without
/// building an intermediate `Value`.
struct NanosSerializer;

macro_rules! nanos_via_i64 {
	($($method:ident: $ty:ty),* $(,)?) => {
		$(
			fn $method(self, v: $ty) -> Result<Self::Ok, Self::Error> {
				Ok(v as i64)
			}
		)*
	};
}

impl Serializer for NanosSerializer {
	type Ok = i64;
	type Error = SerializationError;
	type SerializeSeq = serde::ser::Impossible<i64, SerializationError>;
	type SerializeTuple = serde::ser::Impossible<i64, SerializationError>;
	type SerializeTupleStruct = serde::ser::Impossible<i64, SerializationError>;
	type SerializeTupleVariant = serde::ser::Impossible<i64, SerializationError>;
	type SerializeMap = serde::ser::Impossible<i64, SerializationError>;
	type SerializeStruct = serde::ser::Impossible<i64, SerializationError>;
	type SerializeStructVariant = serde::ser::Impossible<i64, SerializationError>;

	nanos_via_i64!(
		serialize_i8: i8,
		serialize_i16: i16,
		serialize_i32: i32,
		serialize_i64: i64,
		serialize_u8: u8,
		serialize_u16: u16,
		serialize_u32: u32,
		serialize_u64: u64,
	);

	fn serialize_bool(self, _v: bool) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_f32(self, _v: f32) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_f64(self, _v: f64) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_char(self, _v: char) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_str(self, _v: &str) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_some<T>(self, value: &T) -> Result<Self::Ok, Self::Error>
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}
	fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_unit_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
	) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_newtype_struct<T>(
		self,
		_name: &'static str,
		value: &T,
	) -> Result<Self::Ok, Self::Error>
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}
	fn serialize_newtype_variant<T>(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_value: &T,
	) -> Result<Self::Ok, Self::Error>
	where
		T: ?Sized + Serialize,
	{
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_tuple_struct(
		self,
		_name: &'static str,
		_len: usize,
	) -> Result<Self::SerializeTupleStruct, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_tuple_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeTupleVariant, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_struct(
		self,
		_name: &'static str,
		_len: usize,
	) -> Result<Self::SerializeStruct, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
	fn serialize_struct_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeStructVariant, Self::Error> {
		Err(SerializationError("expected integer nanosecond count".into()))
	}
}

/// Extracted during `serialize_newtype_struct(TIMESTAMP_NEWTYPE_NAME, ...)`:
/// reduces the wrapped value straight to its RFC3339 `String`.
struct RawStringSerializer;

impl Serializer for RawStringSerializer {
	type Ok = String;
	type Error = SerializationError;
	type SerializeSeq = serde::ser::Impossible<String, SerializationError>;
	type SerializeTuple = serde::ser::Impossible<String, SerializationError>;
	type SerializeTupleStruct = serde::ser::Impossible<String, SerializationError>;
	type SerializeTupleVariant = serde::ser::Impossible<String, SerializationError>;
	type SerializeMap = serde::ser::Impossible<String, SerializationError>;
	type SerializeStruct = serde::ser::Impossible<String, SerializationError>;
	type SerializeStructVariant = serde::ser::Impossible<String, SerializationError>;

	fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
		Ok(v.to_string())
	}
	fn serialize_newtype_struct<T>(
		self,
		_name: &'static str,
		value: &T,
	) -> Result<Self::Ok, Self::Error>
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}

	fn serialize_bool(self, _v: bool) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_i8(self, _v: i8) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_i16(self, _v: i16) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_i32(self, _v: i32) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_i64(self, _v: i64) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_u8(self, _v: u8) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_u16(self, _v: u16) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_u32(self, _v: u32) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_u64(self, _v: u64) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_f32(self, _v: f32) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_f64(self, _v: f64) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_char(self, _v: char) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_bytes(self, _v: &[u8]) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_some<T>(self, value: &T) -> Result<Self::Ok, Self::Error>
	where
		T: ?Sized + Serialize,
	{
		value.serialize(self)
	}
	fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_unit_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
	) -> Result<Self::Ok, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_newtype_variant<T>(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_value: &T,
	) -> Result<Self::Ok, Self::Error>
	where
		T: ?Sized + Serialize,
	{
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_tuple_struct(
		self,
		_name: &'static str,
		_len: usize,
	) -> Result<Self::SerializeTupleStruct, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_tuple_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeTupleVariant, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_struct(
		self,
		_name: &'static str,
		_len: usize,
	) -> Result<Self::SerializeStruct, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
	fn serialize_struct_variant(
		self,
		_name: &'static str,
		_variant_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self::SerializeStructVariant, Self::Error> {
		Err(SerializationError("expected RFC3339 string".into()))
	}
}

struct SeqSerializer {
	items: Vec<Value<'static>>,
}

impl SeqSerializer {
	fn with_variant(self, variant: &'static str) -> Self {
		// Tuple variants collapse to a single-entry map of variant name to
		// the tuple-as-list, built in `end()`.
		let mut items = self.items;
		items.push(Value::from(variant.to_string()));
		SeqSerializer { items }
	}
}

impl SerializeSeq for SeqSerializer {
	type Ok = Value<'static>;
	type Error = SerializationError;
	fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
	where
		T: ?Sized + Serialize,
	{
		self.items.push(to_value(value)?);
		Ok(())
	}
	fn end(self) -> Result<Self::Ok, Self::Error> {
		Ok(Value::from(self.items))
	}
}

impl SerializeTuple for SeqSerializer {
	type Ok = Value<'static>;
	type Error = SerializationError;
	fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
	where
		T: ?Sized + Serialize,
	{
		SerializeSeq::serialize_element(self, value)
	}
	fn end(self) -> Result<Self::Ok, Self::Error> {
		SerializeSeq::end(self)
	}
}

impl SerializeTupleStruct for SeqSerializer {
	type Ok = Value<'static>;
	type Error = SerializationError;
	fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
	where
		T: ?Sized + Serialize,
	{
		SerializeSeq::serialize_element(self, value)
	}
	fn end(self) -> Result<Self::Ok, Self::Error> {
		SerializeSeq::end(self)
	}
}

impl SerializeTupleVariant for SeqSerializer {
	type Ok = Value<'static>;
	type Error = SerializationError;
	fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
	where
		T: ?Sized + Serialize,
	{
		self.items.push(to_value(value)?);
		Ok(())
	}
	fn end(self) -> Result<Self::Ok, Self::Error> {
		// items[0] holds the variant name pushed by `with_variant`.
		let mut items = self.items;
		let variant = match items.remove(0) {
			Value::String(s) => s.as_ref().to_string(),
			_ => unreachable!("with_variant always pushes a Value::String first"),
		};
		let list = Value::from(items);
		Ok(Value::Map(MapValue::from(
			[(Key::from(variant), list)].into_iter().collect::<std::collections::HashMap<_, _>>(),
		)))
	}
}

struct MapSerializer {
	entries: Vec<(Value<'static>, Value<'static>)>,
	pending_key: Option<Value<'static>>,
	variant: Option<&'static str>,
}

fn key_to_value(key: Value<'static>) -> Result<Key, SerializationError> {
	match key {
		Value::String(s) => Ok(Key::from(s.as_ref().to_string())),
		Value::Int(i) => Ok(Key::from(i)),
		Value::UInt(u) => Ok(Key::from(u)),
		Value::Bool(b) => Ok(Key::from(b)),
		other => Err(SerializationError(format!(
			"map keys must be strings, integers or booleans, got {:?}",
			other.type_of()
		))),
	}
}

impl MapSerializer {
	fn finish(self) -> Result<Value<'static>, SerializationError> {
		let mut map = std::collections::HashMap::with_capacity(self.entries.len());
		for (k, v) in self.entries {
			map.insert(key_to_value(k)?, v);
		}
		let value = Value::Map(MapValue::from(map));
		match self.variant {
			Some(variant) => Ok(Value::Map(MapValue::from(
				[(Key::from(variant), value)]
					.into_iter()
					.collect::<std::collections::HashMap<_, _>>(),
			))),
			None => Ok(value),
		}
	}
}

impl SerializeMap for MapSerializer {
	type Ok = Value<'static>;
	type Error = SerializationError;
	fn serialize_key<T>(&mut self, key: &T) -> Result<(), Self::Error>
	where
		T: ?Sized + Serialize,
	{
		self.pending_key = Some(to_value(key)?);
		Ok(())
	}
	fn serialize_value<T>(&mut self, value: &T) -> Result<(), Self::Error>
	where
		T: ?Sized + Serialize,
	{
		let key = self
			.pending_key
			.take()
			.ok_or_else(|| SerializationError("serialize_value called before serialize_key".into()))?;
		self.entries.push((key, to_value(value)?));
		Ok(())
	}
	fn end(self) -> Result<Self::Ok, Self::Error> {
		self.finish()
	}
}

impl SerializeStruct for MapSerializer {
	type Ok = Value<'static>;
	type Error = SerializationError;
	fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
	where
		T: ?Sized + Serialize,
	{
		self.entries.push((Value::from(key.to_string()), to_value(value)?));
		Ok(())
	}
	fn end(self) -> Result<Self::Ok, Self::Error> {
		self.finish()
	}
}

impl SerializeStructVariant for MapSerializer {
	type Ok = Value<'static>;
	type Error = SerializationError;
	fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
	where
		T: ?Sized + Serialize,
	{
		self.entries.push((Value::from(key.to_string()), to_value(value)?));
		Ok(())
	}
	fn end(self) -> Result<Self::Ok, Self::Error> {
		self.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn converts_primitives() {
		assert_eq!(to_value(5i32).unwrap(), Value::Int(5));
		assert_eq!(to_value(true).unwrap(), Value::Bool(true));
		assert_eq!(to_value("hi").unwrap(), Value::from("hi".to_string()));
	}

	#[test]
	fn converts_json_object() {
		let js = serde_json::json!({"a": 1, "b": [1, 2, 3]});
		let v = to_value(&js).unwrap();
		match v {
			Value::Map(m) => assert_eq!(m.len(), 2),
			other => panic!("expected map, got {other:?}"),
		}
	}

	#[test]
	fn duration_newtype_round_trips() {
		let d = chrono::Duration::milliseconds(1500);
		let v = to_value(Duration(d)).unwrap();
		assert_eq!(v, Value::Duration(d));
	}

	#[test]
	fn timestamp_newtype_round_trips() {
		let ts = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
		let v = to_value(Timestamp(ts)).unwrap();
		assert_eq!(v, Value::Timestamp(ts));
	}
}
