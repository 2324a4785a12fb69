//! Structured logging setup for hosts embedding the engine, following the
//! same `tracing-subscriber` + `EnvFilter` shape used elsewhere in this code
//! base. The engine itself never calls this implicitly; a host (CLI, test
//! harness) opts in once at startup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initializes a global `tracing` subscriber. `json` selects structured JSON
/// output (suited to log aggregation) over pretty human-readable output.
///
/// Respects `RUST_LOG` if set, otherwise defaults to `info`.
pub fn init_tracing(json: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	let registry = tracing_subscriber::registry().with(filter);
	if json {
		registry
			.with(
				tracing_subscriber::fmt::layer()
					.json()
					.with_target(true)
					.with_line_number(true),
			)
			.init();
	} else {
		registry
			.with(tracing_subscriber::fmt::layer().with_target(false))
			.init();
	}
}
