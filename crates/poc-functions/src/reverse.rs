//! Out-of-band reverse-token functions: `newReverse()` constructs a token,
//! `reverse.wait(seconds)` blocks for a hit.

use cel::extractors::{Argument, This};
use cel::objects::KeyRef;
use cel::{Context, FunctionContext, ResolveResult, Value};
use poc_core::reverse;

pub fn insert_all(ctx: &mut Context) {
	ctx.add_function("newReverse", new_reverse);
	ctx.add_function("wait", wait);
}

fn new_reverse<'a>(_ftx: &mut FunctionContext<'a, '_>) -> ResolveResult<'a> {
	Ok(Value::from(&reverse::allocate()))
}

/// `reverse.wait(seconds)`: blocks the evaluating thread until a hit is
/// recorded against the receiver's domain, or the timeout elapses. The
/// runtime evaluates expressions inside a blocking task, so blocking here is
/// safe.
fn wait<'a>(ftx: &mut FunctionContext<'a, '_>, this: This, seconds: Argument) -> ResolveResult<'a> {
	let this = this.load_or_arg_value(ftx)?;
	let domain = match &this {
		Value::Map(m) => match m.get(&KeyRef::from("domain")) {
			Some(Value::String(s)) => s.as_ref().to_string(),
			_ => return Err(ftx.error("reverse.wait: receiver is missing a 'domain' field")),
		},
		_ => return Err(ftx.error("reverse.wait: receiver is not a Reverse value")),
	};
	let seconds = seconds.load(ftx)?.as_unsigned()?;
	Ok(Value::Bool(reverse::wait(
		&domain,
		std::time::Duration::from_secs(seconds as u64),
	)))
}
