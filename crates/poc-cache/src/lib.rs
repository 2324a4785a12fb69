//! The PoC engine's caches: a keyed HTTP request/response cache, a keyed
//! TCP/UDP response cache, and a named TCP/UDP connection cache. All three
//! are process-wide shared state: many PoC executions run concurrently
//! against different targets, so every cache operation here is a single
//! read-write-locked map lookup, mirroring the [`RwLock`]-guarded registry
//! [`poc_core::reverse`] uses for OOB tokens.
//!
//! Cache values are immutable once inserted: a lookup hands back a shared,
//! reference-counted snapshot rather than a mutable handle.

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use hashbrown::HashMap;
use parking_lot::RwLock;
use tokio::net::{TcpStream, UdpSocket};
use tokio::sync::Mutex as AsyncMutex;
use tokio::time::Instant;

use poc_core::model::{ProtoRequest, ProtoResponse};

/// A live TCP or UDP connection stored in the connection cache, plus the
/// read deadline computed once at dial time and never reset for the
/// lifetime of that cached connection.
pub struct CachedConnection {
	pub kind: ConnectionKind,
	pub deadline: Instant,
}

pub enum ConnectionKind {
	Tcp(TcpStream),
	Udp(UdpSocket),
}

impl CachedConnection {
	pub fn new(kind: ConnectionKind, read_timeout: Duration) -> Self {
		Self {
			kind,
			deadline: Instant::now() + read_timeout,
		}
	}

	/// Time remaining until this connection's read deadline, zero if already
	/// elapsed. Every read in the TCP/UDP invoker's read loop is bounded by
	/// this, not by a fresh per-read timeout.
	pub fn remaining(&self) -> Duration {
		self.deadline.saturating_duration_since(Instant::now())
	}
}

#[derive(Default)]
struct Caches {
	http: RwLock<HashMap<Vec<u8>, Arc<(ProtoRequest, ProtoResponse)>>>,
	tcp_udp: RwLock<HashMap<Vec<u8>, Arc<(Vec<u8>, ProtoResponse)>>>,
	connections: RwLock<HashMap<String, Arc<AsyncMutex<CachedConnection>>>>,
}

static CACHES: OnceLock<Caches> = OnceLock::new();

fn caches() -> &'static Caches {
	CACHES.get_or_init(Caches::default)
}

/// Deterministic byte encoding of the fields the HTTP cache keys on: method,
/// path, headers, body, and the follow-redirects flag. Two rendered rule
/// requests that differ in any of these fields must never collide.
pub fn http_key(
	method: &str,
	path: &str,
	headers: &indexmap::IndexMap<String, String>,
	body: &str,
	follow_redirects: bool,
) -> Vec<u8> {
	let mut key = Vec::with_capacity(method.len() + path.len() + body.len() + 32);
	key.extend_from_slice(method.as_bytes());
	key.push(0);
	key.extend_from_slice(path.as_bytes());
	key.push(0);
	for (k, v) in headers {
		key.extend_from_slice(k.as_bytes());
		key.push(b':');
		key.extend_from_slice(v.as_bytes());
		key.push(0);
	}
	key.push(0);
	key.extend_from_slice(body.as_bytes());
	key.push(follow_redirects as u8);
	key
}

pub fn http_get(key: &[u8]) -> Option<Arc<(ProtoRequest, ProtoResponse)>> {
	caches().http.read().get(key).cloned()
}

pub fn http_put(key: Vec<u8>, request: ProtoRequest, response: ProtoResponse) {
	caches().http.write().insert(key, Arc::new((request, response)));
}

pub fn tcp_udp_get(content: &[u8]) -> Option<Arc<(Vec<u8>, ProtoResponse)>> {
	caches().tcp_udp.read().get(content).cloned()
}

pub fn tcp_udp_put(content: Vec<u8>, raw: Vec<u8>, response: ProtoResponse) {
	caches()
		.tcp_udp
		.write()
		.insert(content, Arc::new((raw, response)));
}

/// Looks up a cached connection by its (already execution-scoped)
/// `connection_id` key.
pub fn connection_get(id: &str) -> Option<Arc<AsyncMutex<CachedConnection>>> {
	caches().connections.read().get(id).cloned()
}

/// Stores a freshly dialed connection under `id`, returning the shared
/// handle so the caller can immediately use it without a second lookup.
pub fn connection_insert(id: String, conn: CachedConnection) -> Arc<AsyncMutex<CachedConnection>> {
	let handle = Arc::new(AsyncMutex::new(conn));
	caches().connections.write().insert(id, handle.clone());
	handle
}

/// Removes and returns a cached connection, for PoC teardown: releases the
/// TCP/UDP connections owned by a finished execution.
pub fn connection_remove(id: &str) -> Option<Arc<AsyncMutex<CachedConnection>>> {
	caches().connections.write().remove(id)
}

/// Clears every cache. Exposed for test isolation and nothing else:
/// production hosts never need to reset process-wide state mid-run.
pub fn reset() {
	let c = caches();
	c.http.write().clear();
	c.tcp_udp.write().clear();
	c.connections.write().clear();
}
