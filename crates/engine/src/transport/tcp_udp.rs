//! The TCP/UDP rule invoker: dials (or reuses) a named connection, writes the
//! rule's raw content, and reads until the connection's deadline or EOF.
//!
//! Unlike HTTP, `content` is not template-rendered: PoC documents send it as
//! already-resolved bytes, since parsing and escaping are the host's
//! concern, not this crate's.

use std::time::Duration;

use poc_cache::{CachedConnection, ConnectionKind};
use poc_core::model::{ProtoRequest, ProtoResponse, Rule};

use crate::host::HostContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
	Tcp,
	Udp,
}

pub async fn invoke(
	kind: Kind,
	execution_id: &str,
	rule: &Rule,
	host: &HostContext,
	opened: &mut std::collections::HashSet<String>,
) -> anyhow::Result<(ProtoRequest, ProtoResponse)> {
	let content = rule.request.content.clone();
	let content_bytes = content.into_bytes();

	if rule.request.cache {
		if let Some(hit) = poc_cache::tcp_udp_get(&content_bytes) {
			return Ok((build_proto_request(&content_bytes), (*hit).1.clone()));
		}
	}

	let read_timeout: u64 = rule
		.request
		.read_timeout
		.trim()
		.parse()
		.map_err(|e| anyhow::anyhow!("parsing read_timeout '{}': {e}", rule.request.read_timeout))?;

	let conn_key = format!("{execution_id}:{}", rule.request.connection_id);
	let conn = match poc_cache::connection_get(&conn_key) {
		Some(conn) => conn,
		None => {
			let kind_conn = dial(kind, &host.target).await?;
			let cached = CachedConnection::new(kind_conn, Duration::from_secs(read_timeout));
			poc_cache::connection_insert(conn_key.clone(), cached)
		}
	};
	opened.insert(conn_key);

	let start = std::time::Instant::now();
	let mut guard = conn.lock().await;
	write_all(&mut guard.kind, &content_bytes).await?;

	let mut raw = Vec::new();
	let mut buf = vec![0u8; host.config.tcp_read_chunk_bytes.max(1)];
	loop {
		let remaining = guard.remaining();
		if remaining.is_zero() {
			break;
		}
		match tokio::time::timeout(remaining, read_once(&mut guard.kind, &mut buf)).await {
			Ok(Ok(0)) => break,
			Ok(Ok(n)) => raw.extend_from_slice(&buf[..n]),
			Ok(Err(e)) => return Err(anyhow::anyhow!("read error: {e}")),
			Err(_elapsed) => break,
		}
	}
	drop(guard);
	let latency_ms = start.elapsed().as_millis() as u64;

	let proto_response = ProtoResponse {
		body: raw.clone(),
		raw: raw.clone(),
		latency_ms,
		..Default::default()
	};

	poc_cache::tcp_udp_put(content_bytes.clone(), raw, proto_response.clone());
	Ok((build_proto_request(&content_bytes), proto_response))
}

fn build_proto_request(content_bytes: &[u8]) -> ProtoRequest {
	ProtoRequest {
		body: content_bytes.to_vec(),
		raw: content_bytes.to_vec(),
		..Default::default()
	}
}

async fn dial(kind: Kind, target: &str) -> anyhow::Result<ConnectionKind> {
	match kind {
		Kind::Tcp => {
			let stream = tokio::net::TcpStream::connect(target).await?;
			Ok(ConnectionKind::Tcp(stream))
		}
		Kind::Udp => {
			let socket = tokio::net::UdpSocket::bind("0.0.0.0:0").await?;
			socket.connect(target).await?;
			Ok(ConnectionKind::Udp(socket))
		}
	}
}

async fn write_all(kind: &mut ConnectionKind, data: &[u8]) -> std::io::Result<()> {
	match kind {
		ConnectionKind::Tcp(stream) => {
			use tokio::io::AsyncWriteExt;
			stream.write_all(data).await
		}
		ConnectionKind::Udp(socket) => socket.send(data).await.map(|_| ()),
	}
}

async fn read_once(kind: &mut ConnectionKind, buf: &mut [u8]) -> std::io::Result<usize> {
	match kind {
		ConnectionKind::Tcp(stream) => {
			use tokio::io::AsyncReadExt;
			stream.read(buf).await
		}
		ConnectionKind::Udp(socket) => socket.recv(buf).await,
	}
}
