//! The PoC engine's error kinds. These are never surfaced as type names to a
//! PoC author; they shape host logs and the `ExecutePoc` return value, which
//! collapses everything to `is_vulnerable = false` plus an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PocError {
	/// Malformed `read_timeout`, an unparseable target URL, etc. Fatal to the
	/// PoC run.
	#[error("poc '{poc}': parse error at {context}: {source}")]
	Parse {
		poc: String,
		context: String,
		#[source]
		source: anyhow::Error,
	},

	/// Expression compilation or evaluation failure in `rule.expression` or
	/// the PoC's top-level `expression`. (`set`/`payloads`/`output` failures
	/// are logged and skipped by the runtime rather than surfaced here.)
	///
	/// `source` is `anyhow::Error` rather than `cel::ExecutionError` because
	/// this variant covers both a compile-time `cel::ParseErrors` failure and
	/// a run-time `cel::ExecutionError` failure; both are "evaluation of this
	/// expression did not produce a value" from the runtime's point of view.
	#[error("poc '{poc}': evaluation of '{expression}' failed: {source}")]
	Evaluation {
		poc: String,
		expression: String,
		#[source]
		source: anyhow::Error,
	},

	/// Dial, write, or non-recoverable read failure from the transport
	/// dispatcher. Also covers an HTTP client timeout.
	#[error("poc '{poc}': rule '{rule}' transport error: {source}")]
	Transport {
		poc: String,
		rule: String,
		#[source]
		source: anyhow::Error,
	},

	/// The host's cancellation signal fired mid-execution.
	#[error("poc '{poc}': cancelled")]
	Cancelled { poc: String },

	/// A registered function or the interpreter panicked. Wrapped with the
	/// PoC name so a crash in one PoC never takes down the host.
	#[error("poc '{poc}': recovered from a panic: {message}")]
	PanicRecovered { poc: String, message: String },
}

impl PocError {
	pub fn poc_name(&self) -> &str {
		match self {
			PocError::Parse { poc, .. }
			| PocError::Evaluation { poc, .. }
			| PocError::Transport { poc, .. }
			| PocError::Cancelled { poc }
			| PocError::PanicRecovered { poc, .. } => poc,
		}
	}
}

pub type PocResult<T> = Result<T, PocError>;
