//! Engine-wide tunables: small typed struct, environment-variable overrides,
//! sane defaults so the host can construct an `Engine` with zero setup.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EngineConfig {
	/// Per-HTTP-request timeout, applied by the host's injected HTTP client.
	pub http_timeout: Duration,
	/// Overall wall-clock budget for a single `ExecutePoc` call.
	pub poc_timeout: Duration,
	/// Domain suffix new reverse tokens are minted under, e.g. `<random>.oob.example`.
	pub reverse_domain_suffix: String,
	/// Read-unit size for the TCP/UDP invoker's growing-buffer read loop.
	pub tcp_read_chunk_bytes: usize,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			http_timeout: Duration::from_secs(10),
			poc_timeout: Duration::from_secs(180),
			reverse_domain_suffix: "oob.example".to_string(),
			tcp_read_chunk_bytes: 1024,
		}
	}
}

impl EngineConfig {
	/// Overlays environment-variable overrides onto the defaults. Unset or
	/// unparsable variables are silently ignored in favor of the default.
	pub fn from_env() -> Self {
		let mut cfg = Self::default();
		if let Some(secs) = env_u64("POC_HTTP_TIMEOUT_SECS") {
			cfg.http_timeout = Duration::from_secs(secs);
		}
		if let Some(secs) = env_u64("POC_TIMEOUT_SECS") {
			cfg.poc_timeout = Duration::from_secs(secs);
		}
		if let Ok(suffix) = std::env::var("POC_REVERSE_DOMAIN_SUFFIX") {
			if !suffix.is_empty() {
				cfg.reverse_domain_suffix = suffix;
			}
		}
		if let Some(n) = env_u64("POC_TCP_READ_CHUNK_BYTES") {
			cfg.tcp_read_chunk_bytes = n as usize;
		}
		cfg
	}
}

fn env_u64(name: &str) -> Option<u64> {
	std::env::var(name).ok().and_then(|v| v.parse().ok())
}
