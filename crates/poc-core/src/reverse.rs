//! Out-of-band (OOB) callback token allocation and hit tracking.
//!
//! Process-wide state: many concurrent PoC executions share one token
//! registry, each token scoped to its own random subdomain so hits from one
//! PoC run never satisfy another's `wait`.

use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use rand::random_range;

use crate::model::ReverseInfo;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn random_token(len: usize) -> String {
	(0..len)
		.map(|_| ALPHABET[random_range(0..ALPHABET.len())] as char)
		.collect()
}

struct Registry {
	suffix: RwLock<String>,
	hits: RwLock<HashMap<String, Instant>>,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

fn registry() -> &'static Registry {
	REGISTRY.get_or_init(|| Registry {
		suffix: RwLock::new("oob.example".to_string()),
		hits: RwLock::new(HashMap::new()),
	})
}

/// Sets the domain suffix new tokens are minted under. Called once by the
/// host at startup from [`crate::EngineConfig::reverse_domain_suffix`].
pub fn configure(suffix: &str) {
	*registry().suffix.write() = suffix.to_string();
}

/// Allocates a fresh OOB token for `newReverse()`. Each call mints a unique
/// 8-character subdomain so concurrent PoC executions never collide.
pub fn allocate() -> ReverseInfo {
	let suffix = registry().suffix.read().clone();
	let domain = format!("{}.{suffix}", random_token(8));
	ReverseInfo {
		url: format!("http://{domain}"),
		domain,
		ip: "127.0.0.1".to_string(),
		is_domain_name_server: false,
	}
}

/// Records that `token_or_domain` (a full callback URL, a bare domain, or a
/// DNS query name) was observed. The host's own HTTP/DNS listener calls this
/// when it sees traffic for a domain under the configured suffix; nothing in
/// this crate delivers that traffic itself.
pub fn record_hit(token_or_domain: &str) {
	let domain = extract_domain(token_or_domain);
	registry().hits.write().insert(domain, Instant::now());
}

fn extract_domain(s: &str) -> String {
	let s = s
		.strip_prefix("http://")
		.or_else(|| s.strip_prefix("https://"))
		.unwrap_or(s);
	s.split(['/', '?', '#']).next().unwrap_or(s).to_string()
}

/// Blocks the calling thread until a hit is observed for `domain`, up to
/// `timeout`. Returns `true` as soon as a matching hit is seen.
pub fn wait(domain: &str, timeout: Duration) -> bool {
	let start = Instant::now();
	loop {
		if registry().hits.read().contains_key(domain) {
			return true;
		}
		if start.elapsed() >= timeout {
			return false;
		}
		std::thread::sleep(Duration::from_millis(50));
	}
}

/// Clears all recorded hits, for test isolation.
pub fn reset() {
	registry().hits.write().clear();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn allocate_mints_unique_domains() {
		configure("oob.example");
		let a = allocate();
		let b = allocate();
		assert_ne!(a.domain, b.domain);
		assert!(a.domain.ends_with(".oob.example"));
		assert_eq!(a.url, format!("http://{}", a.domain));
	}

	#[test]
	fn record_hit_then_wait_returns_immediately() {
		reset();
		let r = allocate();
		record_hit(&r.url);
		assert!(wait(&r.domain, Duration::from_millis(10)));
	}

	#[test]
	fn wait_times_out_without_a_hit() {
		reset();
		let r = allocate();
		assert!(!wait(&r.domain, Duration::from_millis(60)));
	}

	#[test]
	fn record_hit_strips_scheme_and_path() {
		reset();
		let r = allocate();
		record_hit(&format!("{}/callback?x=1", r.url));
		assert!(wait(&r.domain, Duration::from_millis(10)));
	}
}
