//! Host-injected configuration for one `execute_poc` call: the HTTP
//! client(s), the request the PoC's rules render against, the dial target
//! for TCP/UDP rules, and cancellation.

use indexmap::IndexMap;
use tokio::sync::watch;

use poc_core::EngineConfig;

/// The target request a PoC's rules render their own requests against.
#[derive(Debug, Clone)]
pub struct OriginalRequest {
	pub method: String,
	pub url: url::Url,
	pub headers: IndexMap<String, String>,
}

/// Two HTTP clients differing only in redirect policy. `reqwest::Client`
/// fixes its redirect policy at build time, so a rule's `follow_redirects`
/// flag selects between a host-built follow/no-follow pair rather than
/// mutating one shared client per request.
#[derive(Clone)]
pub struct HttpClients {
	follow: reqwest::Client,
	no_follow: reqwest::Client,
}

impl HttpClients {
	pub fn new(timeout: std::time::Duration) -> anyhow::Result<Self> {
		let follow = reqwest::Client::builder().timeout(timeout).build()?;
		let no_follow = reqwest::Client::builder()
			.timeout(timeout)
			.redirect(reqwest::redirect::Policy::none())
			.build()?;
		Ok(Self { follow, no_follow })
	}

	pub fn select(&self, follow_redirects: bool) -> &reqwest::Client {
		if follow_redirects { &self.follow } else { &self.no_follow }
	}
}

/// Host-supplied cancellation signal, observed between rules. Backed by
/// `tokio::sync::watch` rather than `tokio_util::CancellationToken` since the
/// latter is not part of this workspace's dependency stack.
#[derive(Clone)]
pub struct Cancellation(watch::Receiver<bool>);

pub struct CancellationHandle(watch::Sender<bool>);

impl CancellationHandle {
	pub fn cancel(&self) {
		let _ = self.0.send(true);
	}
}

impl Cancellation {
	pub fn pair() -> (CancellationHandle, Self) {
		let (tx, rx) = watch::channel(false);
		(CancellationHandle(tx), Cancellation(rx))
	}

	pub fn is_cancelled(&self) -> bool {
		*self.0.borrow()
	}
}

impl Default for Cancellation {
	fn default() -> Self {
		Cancellation::pair().1
	}
}

/// Everything the host injects for one PoC execution.
pub struct HostContext {
	pub http: HttpClients,
	pub original_request: OriginalRequest,
	/// `host:port` (or bare host) TCP/UDP rules dial.
	pub target: String,
	pub cancellation: Cancellation,
	pub config: EngineConfig,
}
