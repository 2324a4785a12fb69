//! The PoC data model: the seam a YAML parser (out of scope for this crate) hands
//! values across to the runtime. Field names and ordering mirror the xray-style
//! PoC document described by the host's YAML dialect.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The network protocol family a PoC's rules probe with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
	Http,
	Tcp,
	Udp,
}

impl Default for Transport {
	fn default() -> Self {
		Transport::Http
	}
}

impl Transport {
	/// Parses the raw `transport` string from a PoC document. An empty string
	/// means HTTP.
	pub fn parse(raw: &str) -> Result<Transport, String> {
		match raw {
			"" | "http" => Ok(Transport::Http),
			"tcp" => Ok(Transport::Tcp),
			"udp" => Ok(Transport::Udp),
			other => Err(format!("unknown transport '{other}'")),
		}
	}
}

/// An ordered `(name, expression)` binding list, as used by `set`, a `payloads`
/// group, and a rule's `output`. Declaration order must survive parsing.
pub type Bindings = IndexMap<String, String>;

/// The root PoC document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Poc {
	pub name: String,
	#[serde(default)]
	pub transport: String,
	#[serde(default)]
	pub set: Bindings,
	#[serde(default)]
	pub payloads: Vec<Bindings>,
	#[serde(default)]
	pub rules: IndexMap<String, Rule>,
	pub expression: String,
	#[serde(default)]
	pub detail: Detail,
}

impl Poc {
	pub fn transport(&self) -> Result<Transport, String> {
		Transport::parse(&self.transport)
	}
}

/// One probe within a PoC: a request, a match expression, and output bindings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rule {
	pub request: RuleRequest,
	pub expression: String,
	#[serde(default)]
	pub output: Bindings,
}

/// A rule's request. HTTP and TCP/UDP PoCs use disjoint subsets of these
/// fields; which subset applies is decided by the owning `Poc::transport`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleRequest {
	// HTTP fields
	#[serde(default)]
	pub method: String,
	#[serde(default)]
	pub path: String,
	#[serde(default)]
	pub headers: IndexMap<String, String>,
	#[serde(default)]
	pub body: String,
	#[serde(default)]
	pub follow_redirects: bool,

	// TCP/UDP fields
	#[serde(default)]
	pub content: String,
	#[serde(default)]
	pub connection_id: String,
	#[serde(default)]
	pub read_timeout: String,

	#[serde(default)]
	pub cache: bool,
}

/// Free-form PoC metadata. String fields here are subject to template rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Detail {
	#[serde(default)]
	pub author: String,
	#[serde(default)]
	pub links: Vec<String>,
	#[serde(default)]
	pub fingerprint: Fingerprint,
	#[serde(default)]
	pub vulnerability: Vulnerability,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fingerprint {
	#[serde(default)]
	pub infos: Vec<Info>,
	#[serde(default)]
	pub host_info: HostInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
	#[serde(default)]
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub version: String,
	#[serde(default, rename = "type")]
	pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostInfo {
	#[serde(default)]
	pub hostname: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vulnerability {
	#[serde(default)]
	pub id: String,
	#[serde(default, rename = "match")]
	pub matched: String,
}

/// An out-of-band callback token allocated by `newReverse()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReverseInfo {
	pub url: String,
	pub domain: String,
	pub ip: String,
	pub is_domain_name_server: bool,
}

/// A normalized URL snapshot attached to `ProtoRequest`/`ProtoResponse`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlParts {
	pub scheme: String,
	pub host: String,
	pub port: u16,
	pub path: String,
	pub query: String,
	pub fragment: String,
}

/// The snapshot of a just-issued probe request, bound into the variable map
/// as `request`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtoRequest {
	pub url: UrlParts,
	pub method: String,
	pub headers: IndexMap<String, String>,
	#[serde(with = "serde_bytes_vec")]
	pub raw_header: Vec<u8>,
	#[serde(with = "serde_bytes_vec")]
	pub body: Vec<u8>,
	#[serde(with = "serde_bytes_vec")]
	pub raw: Vec<u8>,
}

/// The snapshot of a completed probe response, bound into the variable map
/// as `response`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtoResponse {
	pub url: UrlParts,
	pub status: u16,
	pub headers: IndexMap<String, String>,
	pub content_type: String,
	#[serde(with = "serde_bytes_vec")]
	pub raw_header: Vec<u8>,
	#[serde(with = "serde_bytes_vec")]
	pub body: Vec<u8>,
	#[serde(with = "serde_bytes_vec")]
	pub raw: Vec<u8>,
	pub latency_ms: u64,
}

// serde(rename_all) doesn't give us a `Vec<u8>` <-> bytes codec for free, and we
// don't want serde_bytes as a whole extra dependency just for this.
mod serde_bytes_vec {
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(v: &[u8], s: S) -> Result<S::Ok, S::Error> {
		s.serialize_bytes(v)
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
		Vec::<u8>::deserialize(d)
	}
}
