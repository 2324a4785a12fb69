//! General-purpose CEL helpers: base64 aliasing, a conditional default,
//! `with`, `regexReplace` and `fail`. These aren't PoC-specific, so they live
//! apart from the reverse-token and byte/string helpers in [`crate::poc`].

use cel::context::SingleVarResolver;
use cel::extractors::{Argument, This};
use cel::objects::StringValue;
use cel::{Context, ExecutionError, FunctionContext, ResolveResult, Value};

pub fn insert_all(ctx: &mut Context) {
	ctx.add_function("base64Encode", base64_encode);
	ctx.add_function("base64", base64_encode);
	ctx.add_function("base64Decode", base64_decode);
	ctx.add_function("default", default);
	ctx.add_function("regexReplace", regex_replace);
	ctx.add_function("fail", fail);
	ctx.add_function("with", with);
}

fn base64_encode<'a>(ftx: &mut FunctionContext<'a, '_>, this: This) -> ResolveResult<'a> {
	use base64::Engine;
	let this: StringValue = this.load_or_arg(ftx)?;
	Ok(Value::from(base64::prelude::BASE64_STANDARD.encode(
		this.as_ref().as_bytes(),
	)))
}

fn base64_decode<'a>(ftx: &mut FunctionContext<'a, '_>, this: This) -> ResolveResult<'a> {
	use base64::Engine;
	let this: StringValue = this.load_or_arg(ftx)?;
	let decoded = base64::prelude::BASE64_STANDARD
		.decode(this.as_ref())
		.map_err(|e| ftx.error(e))?;
	Ok(Value::from(decoded))
}

fn regex_replace<'a>(
	ftx: &mut FunctionContext<'a, '_>,
	this: This,
	pattern: Argument,
	replacement: Argument,
) -> ResolveResult<'a> {
	let this: StringValue = this.load_or_arg(ftx)?;
	let pattern: StringValue = pattern.load_value(ftx)?;
	let replacement: StringValue = replacement.load_value(ftx)?;
	match regex::Regex::new(pattern.as_ref()) {
		Ok(re) => Ok(Value::from(
			re.replace_all(this.as_ref(), replacement.as_ref()).into_owned(),
		)),
		Err(err) => Err(ftx.error(format!("'{}' not a valid regex:\n{err}", pattern.as_ref()))),
	}
}

fn fail<'a>(ftx: &mut FunctionContext<'a, '_>, this: This) -> ResolveResult<'a> {
	let message: StringValue = this.load_or_arg(ftx)?;
	Err(ftx.error(format!("fail() called: {}", message.as_ref())))
}

/// `default(expr, fallback)`: evaluates `expr`, treating both `null` and "no
/// such key"/"undeclared reference" as absent.
fn default<'a>(ftx: &mut FunctionContext<'a, '_>) -> ResolveResult<'a> {
	let expr = ftx.expr(0)?;
	let fallback = ftx.value(1)?;
	match Value::resolve(expr, ftx.ptx, ftx.vars()) {
		Ok(Value::Null) => Ok(fallback),
		Ok(v) => Ok(v),
		Err(ExecutionError::NoSuchKey(_)) | Err(ExecutionError::UndeclaredReference(_)) => Ok(fallback),
		Err(e) => Err(e),
	}
}

/// `this.with(name, expr)`: binds `this` to `name` and evaluates `expr` in
/// that scope, without mutating the outer variable map.
fn with<'a>(ftx: &mut FunctionContext<'a, '_>) -> ResolveResult<'a> {
	let this = ftx.this_value()?;
	let name = ftx.ident(0)?;
	let expr = ftx.expr(1)?;
	let resolver = SingleVarResolver::new(ftx.vars(), name, this);
	Value::resolve(expr, ftx.ptx, &resolver)
}
