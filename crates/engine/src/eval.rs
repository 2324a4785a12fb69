//! Expression evaluation: compiles and runs one CEL expression against a
//! snapshot of the current variable map, rebuilding the function table fresh
//! at every call so newly-completed rules' zero-arg result functions are
//! always in scope.
//!
//! Every evaluation runs inside [`tokio::task::spawn_blocking`]. This keeps
//! registered blocking functions (`sleep`, `reverse.wait`, see
//! `poc_functions::poc::sleep`) off the async reactor, and it doubles as a
//! panic guard: a panicking interpreter or registered function surfaces here
//! as a caught `JoinError`, never as an unwind into the caller.

use cel::{Context, FunctionContext, Program, ResolveResult, Value};

use poc_core::value::default_string;
use poc_core::varmap::VariableMap;

/// Why an expression evaluation did not produce a value.
#[derive(Debug)]
pub enum EvalFailure {
	/// The interpreter or a registered function panicked.
	Panicked(String),
	/// Compilation or execution returned an error.
	Failed(anyhow::Error),
}

impl std::fmt::Display for EvalFailure {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			EvalFailure::Panicked(m) => write!(f, "panicked: {m}"),
			EvalFailure::Failed(e) => write!(f, "{e}"),
		}
	}
}

/// Compiles and evaluates `source` against `vars`, with `rule_results`
/// registered as zero-argument functions returning their captured boolean:
/// a completed rule's name becomes callable from later expressions, e.g.
/// `rule1() && rule2()`.
pub async fn evaluate(
	source: &str,
	rule_results: &[(String, bool)],
	vars: &VariableMap,
) -> Result<Value<'static>, EvalFailure> {
	let source = source.to_string();
	let rule_results = rule_results.to_vec();
	let vars = vars.clone();

	let joined = tokio::task::spawn_blocking(move || -> anyhow::Result<Value<'static>> {
		let program = Program::compile(&source).map_err(|e| anyhow::anyhow!("compiling '{source}': {e}"))?;

		let mut ctx = Context::default();
		poc_functions::insert_all(&mut ctx);
		for (name, result) in rule_results {
			ctx.add_function(name.as_str(), move |_ftx: &mut FunctionContext| -> ResolveResult {
				Ok(Value::Bool(result))
			});
		}

		let resolver = vars.as_resolver();
		let value = program.execute_with(&ctx, &resolver)?;
		Ok(value.as_static())
	})
	.await;

	match joined {
		Ok(Ok(value)) => Ok(value),
		Ok(Err(source)) => Err(EvalFailure::Failed(source)),
		Err(join_err) if join_err.is_panic() => Err(EvalFailure::Panicked(panic_message(join_err))),
		Err(join_err) => Err(EvalFailure::Failed(anyhow::anyhow!("evaluation task did not complete: {join_err}"))),
	}
}

fn panic_message(err: tokio::task::JoinError) -> String {
	match err.try_into_panic() {
		Ok(payload) => payload
			.downcast_ref::<&str>()
			.map(|s| s.to_string())
			.or_else(|| payload.downcast_ref::<String>().cloned())
			.unwrap_or_else(|| "non-string panic payload".to_string()),
		Err(_) => "unknown panic".to_string(),
	}
}

/// Coerces an expression's return value into the representation stored back
/// into the variable map (see DESIGN.md): an `int` passes through unchanged,
/// a `UrlType`-shaped map stringifies to its URL, and everything else
/// stringifies with [`default_string`].
pub fn coerce_for_storage(value: Value<'static>) -> Value<'static> {
	match &value {
		Value::Int(_) => value,
		Value::Map(m) if is_url_shaped(m) => Value::from(url_string(m)),
		_ => Value::from(default_string(&value)),
	}
}

fn is_url_shaped(m: &cel::objects::MapValue<'_>) -> bool {
	use cel::objects::KeyRef;
	matches!(m.get(&KeyRef::from("scheme")), Some(Value::String(_))) && matches!(m.get(&KeyRef::from("host")), Some(Value::String(_)))
}

fn url_string(m: &cel::objects::MapValue<'_>) -> String {
	use cel::objects::KeyRef;
	let field = |key: &str| -> String {
		match m.get(&KeyRef::from(key)) {
			Some(Value::String(s)) => s.as_ref().to_string(),
			_ => String::new(),
		}
	};
	let port = match m.get(&KeyRef::from("port")) {
		Some(Value::Int(p)) => *p as u16,
		_ => 0,
	};
	poc_core::model::UrlParts {
		scheme: field("scheme"),
		host: field("host"),
		port,
		path: field("path"),
		query: field("query"),
		fragment: field("fragment"),
	}
	.to_url_string()
}
