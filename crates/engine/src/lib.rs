//! The PoC execution engine: wires the data model, CEL dialect, caches, and
//! transport invokers (`poc-core`, `poc-functions`, `poc-cache`, `cel`) into
//! one runtime state machine.
//!
//! [`execute_poc`] is the crate's single entry point: given a host context
//! and a parsed [`poc_core::model::Poc`], it runs the PoC to completion and
//! reports a verdict.

pub mod eval;
pub mod host;
pub mod runtime;
pub mod transport;

pub use host::{Cancellation, CancellationHandle, HostContext, HttpClients, OriginalRequest};
pub use runtime::{execute_poc, ExecutionOutcome};
