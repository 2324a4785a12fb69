//! The PoC execution state machine: bind `set`, then each `payloads` group,
//! render `detail`, run each rule in order (transport dispatch, expression
//! match, `output` bindings, a callable zero-arg result function), then
//! evaluate the PoC's own top-level expression.
//!
//! A rule's transport or expression failure aborts the whole execution with
//! a wrapped error; a `set`/`payloads`/`output` binding failure is logged and
//! the binding is simply skipped, matching the source function's two
//! different error-handling paths for the same `evaluateUpdateVariableMap`
//! helper versus its `RequestInvoke` caller.

use std::collections::HashSet;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use cel::Value;
use poc_core::error::PocError;
use poc_core::model::{Detail, Poc, Transport};
use poc_core::render::render;
use poc_core::varmap::VariableMap;

use crate::eval::{coerce_for_storage, evaluate, EvalFailure};
use crate::host::HostContext;
use crate::transport;

/// What `execute_poc` hands back to the host: the verdict plus an optional
/// error, and the rendered `detail` as a convenience byproduct since the
/// runtime already has to render it to evaluate templates.
pub struct ExecutionOutcome {
	pub is_vulnerable: bool,
	pub error: Option<PocError>,
	pub detail: Detail,
}

impl ExecutionOutcome {
	fn failed(poc_name: &str, error: PocError) -> Self {
		ExecutionOutcome {
			is_vulnerable: false,
			error: Some(error),
			detail: Detail::default(),
		}
	}
}

/// Runs one PoC to completion against `host`. Never panics: any panic from
/// the interpreter or a registered function is caught and reported as
/// [`PocError::PanicRecovered`]; any overrun of `host.config.poc_timeout` is
/// reported as [`PocError::Cancelled`].
pub async fn execute_poc(host: &HostContext, poc: &Poc) -> ExecutionOutcome {
	let guarded = AssertUnwindSafe(run(host, poc)).catch_unwind();
	match tokio::time::timeout(host.config.poc_timeout, guarded).await {
		Ok(Ok(outcome)) => outcome,
		Ok(Err(_panic)) => {
			tracing::error!(poc = %poc.name, "panic recovered from poc execution");
			ExecutionOutcome::failed(
				&poc.name,
				PocError::PanicRecovered {
					poc: poc.name.clone(),
					message: "panic during poc execution".to_string(),
				},
			)
		}
		Err(_elapsed) => {
			tracing::warn!(poc = %poc.name, "poc execution timed out");
			ExecutionOutcome::failed(&poc.name, PocError::Cancelled { poc: poc.name.clone() })
		}
	}
}

async fn run(host: &HostContext, poc: &Poc) -> ExecutionOutcome {
	let transport_kind = match poc.transport() {
		Ok(t) => t,
		Err(message) => {
			return ExecutionOutcome::failed(
				&poc.name,
				PocError::Parse {
					poc: poc.name.clone(),
					context: "transport".to_string(),
					source: anyhow::anyhow!(message),
				},
			);
		}
	};

	let execution_id = uuid::Uuid::new_v4().to_string();
	let mut vars = VariableMap::new();
	let mut rule_results: Vec<(String, bool)> = Vec::new();
	let mut opened_connections: HashSet<String> = HashSet::new();

	tracing::debug!(poc = %poc.name, transport = ?transport_kind, "starting poc execution");

	if let Err(error) = bind_ordered(&poc.name, &poc.set, &rule_results, &mut vars).await {
		return ExecutionOutcome::failed(&poc.name, error);
	}
	for group in &poc.payloads {
		if let Err(error) = bind_ordered(&poc.name, group, &rule_results, &mut vars).await {
			cleanup(&opened_connections);
			return ExecutionOutcome::failed(&poc.name, error);
		}
	}

	let mut detail = poc.detail.clone();
	render_detail(&mut detail, &vars);

	for (rule_name, rule) in &poc.rules {
		if host.cancellation.is_cancelled() {
			cleanup(&opened_connections);
			return ExecutionOutcome::failed(&poc.name, PocError::Cancelled { poc: poc.name.clone() });
		}

		let probe = match transport_kind {
			Transport::Http => transport::http::invoke(rule, host, &vars).await,
			Transport::Tcp => transport::tcp_udp::invoke(transport::tcp_udp::Kind::Tcp, &execution_id, rule, host, &mut opened_connections).await,
			Transport::Udp => transport::tcp_udp::invoke(transport::tcp_udp::Kind::Udp, &execution_id, rule, host, &mut opened_connections).await,
		};

		let (proto_request, proto_response) = match probe {
			Ok(v) => v,
			Err(source) => {
				tracing::error!(poc = %poc.name, rule = %rule_name, error = %source, "rule transport failed");
				cleanup(&opened_connections);
				return ExecutionOutcome::failed(
					&poc.name,
					PocError::Transport {
						poc: poc.name.clone(),
						rule: rule_name.clone(),
						source,
					},
				);
			}
		};

		vars.insert("request", Value::from(&proto_request));
		vars.insert("response", Value::from(&proto_response));

		let result = match evaluate(&rule.expression, &rule_results, &vars).await {
			Ok(Value::Bool(b)) => b,
			Ok(_) => false,
			Err(failure) => {
				cleanup(&opened_connections);
				return ExecutionOutcome::failed(&poc.name, rule_eval_error(&poc.name, &rule.expression, failure));
			}
		};

		if let Err(error) = bind_ordered(&poc.name, &rule.output, &rule_results, &mut vars).await {
			cleanup(&opened_connections);
			return ExecutionOutcome::failed(&poc.name, error);
		}
		rule_results.push((rule_name.clone(), result));
	}

	let verdict = match evaluate(&poc.expression, &rule_results, &vars).await {
		Ok(Value::Bool(b)) => b,
		Ok(_) => false,
		Err(failure) => {
			cleanup(&opened_connections);
			return ExecutionOutcome::failed(&poc.name, rule_eval_error(&poc.name, &poc.expression, failure));
		}
	};

	cleanup(&opened_connections);
	ExecutionOutcome {
		is_vulnerable: verdict,
		error: None,
		detail,
	}
}

fn rule_eval_error(poc_name: &str, expression: &str, failure: EvalFailure) -> PocError {
	match failure {
		EvalFailure::Panicked(message) => PocError::PanicRecovered {
			poc: poc_name.to_string(),
			message,
		},
		EvalFailure::Failed(source) => PocError::Evaluation {
			poc: poc_name.to_string(),
			expression: expression.to_string(),
			source,
		},
	}
}

/// Evaluates each `(name, expression)` binding in declaration order, special
/// casing the literal `newReverse()` expression (the only way a non-scalar
/// value enters the variable map), and otherwise storing the evaluator's
/// return value through [`coerce_for_storage`]. A single binding's
/// evaluation failure is logged and skipped rather than aborting the PoC; a
/// panic still aborts it.
async fn bind_ordered(poc_name: &str, bindings: &poc_core::model::Bindings, rule_results: &[(String, bool)], vars: &mut VariableMap) -> Result<(), PocError> {
	for (name, expression) in bindings {
		if expression.trim() == "newReverse()" {
			vars.insert(name.clone(), Value::from(&poc_core::reverse::allocate()));
			continue;
		}
		match evaluate(expression, rule_results, vars).await {
			Ok(value) => vars.insert(name.clone(), coerce_for_storage(value)),
			Err(EvalFailure::Panicked(message)) => {
				return Err(PocError::PanicRecovered {
					poc: poc_name.to_string(),
					message,
				});
			}
			Err(EvalFailure::Failed(source)) => {
				tracing::warn!(poc = poc_name, binding = %name, expression = %expression, error = %source, "binding evaluation failed, skipping");
			}
		}
	}
	Ok(())
}

fn render_detail(detail: &mut Detail, vars: &VariableMap) {
	detail.author = render(&detail.author, vars);
	for link in detail.links.iter_mut() {
		*link = render(link, vars);
	}
	for info in detail.fingerprint.infos.iter_mut() {
		info.id = render(&info.id, vars);
		info.name = render(&info.name, vars);
		info.version = render(&info.version, vars);
		info.kind = render(&info.kind, vars);
	}
	detail.fingerprint.host_info.hostname = render(&detail.fingerprint.host_info.hostname, vars);
	detail.vulnerability.id = render(&detail.vulnerability.id, vars);
	detail.vulnerability.matched = render(&detail.vulnerability.matched, vars);
}

/// Releases every TCP/UDP connection this execution dialed. A no-op for HTTP
/// PoCs, whose `opened_connections` set is always empty.
fn cleanup(opened_connections: &HashSet<String>) {
	for id in opened_connections {
		poc_cache::connection_remove(id);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use indexmap::IndexMap;
	use poc_core::model::{Rule, RuleRequest};

	fn host_for(uri: &str) -> HostContext {
		HostContext {
			http: crate::host::HttpClients::new(std::time::Duration::from_secs(5)).unwrap(),
			original_request: crate::host::OriginalRequest {
				method: "GET".to_string(),
				url: url::Url::parse(uri).unwrap(),
				headers: IndexMap::new(),
			},
			target: url::Url::parse(uri).unwrap().host_str().unwrap_or_default().to_string(),
			cancellation: crate::host::Cancellation::default(),
			config: poc_core::EngineConfig::default(),
		}
	}

	#[tokio::test]
	async fn a_trivially_true_poc_reports_vulnerable() {
		let server = wiremock::MockServer::start().await;
		wiremock::Mock::given(wiremock::matchers::method("GET"))
			.and(wiremock::matchers::path("/"))
			.respond_with(wiremock::ResponseTemplate::new(200))
			.mount(&server)
			.await;

		let host = host_for(&server.uri());
		let mut poc = Poc {
			name: "trivial".to_string(),
			transport: "http".to_string(),
			expression: "response.status == 200".to_string(),
			..Default::default()
		};
		poc.rules.insert(
			"rule1".to_string(),
			Rule {
				request: RuleRequest::default(),
				expression: "response.status == 200".to_string(),
				output: IndexMap::new(),
			},
		);

		let outcome = execute_poc(&host, &poc).await;
		assert!(outcome.error.is_none());
		assert!(outcome.is_vulnerable);
	}

	#[tokio::test]
	async fn an_unparseable_transport_is_a_parse_error() {
		let host = host_for("http://example.com");
		let poc = Poc {
			name: "bad-transport".to_string(),
			transport: "carrier-pigeon".to_string(),
			expression: "true".to_string(),
			..Default::default()
		};
		let outcome = execute_poc(&host, &poc).await;
		assert!(!outcome.is_vulnerable);
		assert!(matches!(outcome.error, Some(PocError::Parse { .. })));
	}

	#[tokio::test]
	async fn set_bindings_are_visible_to_the_rule_chain() {
		let server = wiremock::MockServer::start().await;
		wiremock::Mock::given(wiremock::matchers::method("GET"))
			.respond_with(wiremock::ResponseTemplate::new(200))
			.mount(&server)
			.await;

		let host = host_for(&server.uri());
		let mut set = IndexMap::new();
		set.insert("marker".to_string(), "\"hello\"".to_string());
		let mut poc = Poc {
			name: "set-visibility".to_string(),
			transport: "http".to_string(),
			set,
			expression: "rule1()".to_string(),
			..Default::default()
		};
		poc.rules.insert(
			"rule1".to_string(),
			Rule {
				request: RuleRequest::default(),
				expression: "marker == \"hello\"".to_string(),
				output: IndexMap::new(),
			},
		);

		let outcome = execute_poc(&host, &poc).await;
		assert!(outcome.error.is_none());
		assert!(outcome.is_vulnerable);
	}
}
