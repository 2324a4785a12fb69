//! Conversions between the PoC data model and `cel::Value`, plus the
//! "default string representation" shared by the template renderer and the
//! expression evaluator's return-value coercion.

use std::collections::HashMap;

use cel::objects::{Key, MapValue};
use cel::Value;

use crate::model::{ProtoRequest, ProtoResponse, ReverseInfo, UrlParts};

fn map_of(pairs: Vec<(String, Value<'static>)>) -> Value<'static> {
	let map: HashMap<Key, Value<'static>> = pairs.into_iter().map(|(k, v)| (Key::from(k.as_str()), v)).collect();
	Value::Map(MapValue::from(map))
}

fn string_map(pairs: &indexmap::IndexMap<String, String>) -> Value<'static> {
	map_of(
		pairs
			.iter()
			.map(|(k, v)| (k.clone(), Value::from(v.clone())))
			.collect(),
	)
}

impl From<&UrlParts> for Value<'static> {
	fn from(u: &UrlParts) -> Self {
		map_of(vec![
			("scheme".to_string(), Value::from(u.scheme.clone())),
			("host".to_string(), Value::from(u.host.clone())),
			("port".to_string(), Value::Int(u.port as i64)),
			("path".to_string(), Value::from(u.path.clone())),
			("query".to_string(), Value::from(u.query.clone())),
			("fragment".to_string(), Value::from(u.fragment.clone())),
		])
	}
}

impl UrlParts {
	/// The "stringified URL" used when a `UrlType` is coerced into the
	/// variable map or rendered into a template.
	pub fn to_url_string(&self) -> String {
		let mut s = format!("{}://{}", self.scheme, self.host);
		let default_port = match self.scheme.as_str() {
			"https" => 443,
			_ => 80,
		};
		if self.port != 0 && self.port != default_port {
			s.push(':');
			s.push_str(&self.port.to_string());
		}
		s.push_str(&self.path);
		if !self.query.is_empty() {
			s.push('?');
			s.push_str(&self.query);
		}
		if !self.fragment.is_empty() {
			s.push('#');
			s.push_str(&self.fragment);
		}
		s
	}
}

impl From<&ProtoRequest> for Value<'static> {
	fn from(r: &ProtoRequest) -> Self {
		map_of(vec![
			("url".to_string(), Value::from(&r.url)),
			("method".to_string(), Value::from(r.method.clone())),
			("headers".to_string(), string_map(&r.headers)),
			("raw_header".to_string(), Value::from(r.raw_header.clone())),
			("body".to_string(), Value::from(r.body.clone())),
			("raw".to_string(), Value::from(r.raw.clone())),
		])
	}
}

impl From<&ProtoResponse> for Value<'static> {
	fn from(r: &ProtoResponse) -> Self {
		map_of(vec![
			("url".to_string(), Value::from(&r.url)),
			("status".to_string(), Value::Int(r.status as i64)),
			("headers".to_string(), string_map(&r.headers)),
			(
				"content_type".to_string(),
				Value::from(r.content_type.clone()),
			),
			("raw_header".to_string(), Value::from(r.raw_header.clone())),
			("body".to_string(), Value::from(r.body.clone())),
			(
				"body_string".to_string(),
				Value::from(String::from_utf8_lossy(&r.body).into_owned()),
			),
			("body_bytes".to_string(), Value::from(r.body.clone())),
			("raw".to_string(), Value::from(r.raw.clone())),
			("latency_ms".to_string(), Value::Int(r.latency_ms as i64)),
		])
	}
}

impl From<&ReverseInfo> for Value<'static> {
	fn from(r: &ReverseInfo) -> Self {
		map_of(vec![
			("url".to_string(), Value::from(r.url.clone())),
			("domain".to_string(), Value::from(r.domain.clone())),
			("ip".to_string(), Value::from(r.ip.clone())),
			(
				"is_domain_name_server".to_string(),
				Value::Bool(r.is_domain_name_server),
			),
		])
	}
}

/// The "default string representation" of a value. Used by the template
/// renderer for `{{name}}` substitution and by the runtime when a
/// non-`UrlType`, non-int return value is stored back into the variable map.
///
/// Bytes that are valid UTF-8 render as text; otherwise they render
/// hex-encoded (see DESIGN.md).
pub fn default_string(v: &Value) -> String {
	match v {
		Value::Int(i) => i.to_string(),
		Value::UInt(u) => u.to_string(),
		Value::Float(f) => f.to_string(),
		Value::Bool(b) => b.to_string(),
		Value::String(s) => s.as_ref().to_string(),
		Value::Bytes(b) => match std::str::from_utf8(b.as_ref()) {
			Ok(s) => s.to_string(),
			Err(_) => hex::encode(b.as_ref()),
		},
		Value::Null => String::new(),
		// A `Reverse` binding is a plain map carrying a non-string field
		// (`is_domain_name_server`), so it never matches `is_string_map` and
		// reaches here. It stringifies to its URL.
		Value::Map(m) => match m.get(&cel::objects::KeyRef::from("url")) {
			Some(Value::String(url)) => url.as_ref().to_string(),
			_ => format!("{m:?}"),
		},
		other => format!("{other:?}"),
	}
}

/// Is this value a "mapping of string"? Such values are
/// skipped by the template renderer rather than stringified. A map with any
/// non-string value (e.g. a `Reverse` binding, which carries a bool field) is
/// not a "mapping of string" and falls through to [`default_string`] instead.
pub fn is_string_map(v: &Value) -> bool {
	match v {
		Value::Map(m) => m.iter().all(|(_, v)| matches!(v, Value::String(_))),
		_ => false,
	}
}
