//! The PoC dialect's byte/string helper functions: hashing, URL encoding,
//! substrings, containment checks, random strings, printability, and the
//! blocking `sleep`. Most of these are invoked free-function style
//! (`md5(x)`, `substr(s,i,n)`, …); `bcontains`/`icontains` additionally
//! accept the haystack as a receiver (`response.body.bcontains(b"x")`),
//! since that is the idiom PoC rule expressions use most.

use cel::extractors::{Argument, This};
use cel::objects::{BytesValue, StringValue};
use cel::{Context, FunctionContext, ResolveResult, Value};
use md5::{Digest, Md5};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use rand::random_range;
use sha1::Sha1;
use sha2::Sha256;

pub fn insert_all(ctx: &mut Context) {
	ctx.add_function("md5", md5_hex);
	ctx.add_function("sha1", sha1_hex);
	ctx.add_function("sha256", sha256_hex);
	ctx.add_function("urlencode", urlencode);
	ctx.add_function("urldecode", urldecode);
	ctx.add_function("substr", substr);
	ctx.add_function("bcontains", bcontains);
	ctx.add_function("icontains", icontains);
	ctx.add_function("randomInt", random_int);
	ctx.add_function("randomLowercase", random_lowercase);
	ctx.add_function("randomUppercase", random_uppercase);
	ctx.add_function("uuid", uuid_v4);
	ctx.add_function("printable", printable);
	ctx.add_function("sleep", sleep);
}

fn md5_hex<'a>(ftx: &mut FunctionContext<'a, '_>, x: Argument) -> ResolveResult<'a> {
	let bytes = value_bytes(&x.load(ftx)?, ftx)?;
	let mut hasher = Md5::new();
	hasher.update(&bytes);
	Ok(Value::from(hex::encode(hasher.finalize())))
}

fn sha1_hex<'a>(ftx: &mut FunctionContext<'a, '_>, x: Argument) -> ResolveResult<'a> {
	let bytes = value_bytes(&x.load(ftx)?, ftx)?;
	let mut hasher = Sha1::new();
	hasher.update(&bytes);
	Ok(Value::from(hex::encode(hasher.finalize())))
}

fn sha256_hex<'a>(ftx: &mut FunctionContext<'a, '_>, x: Argument) -> ResolveResult<'a> {
	let bytes = value_bytes(&x.load(ftx)?, ftx)?;
	let mut hasher = Sha256::new();
	hasher.update(&bytes);
	Ok(Value::from(hex::encode(hasher.finalize())))
}

/// `uuid()`: a random v4 UUID string, for PoCs that need a fresh unique
/// marker alongside (or instead of) an OOB reverse token.
fn uuid_v4<'a>(_ftx: &mut FunctionContext<'a, '_>) -> ResolveResult<'a> {
	Ok(Value::from(uuid::Uuid::new_v4().to_string()))
}

fn urlencode<'a>(ftx: &mut FunctionContext<'a, '_>, s: Argument) -> ResolveResult<'a> {
	let s: StringValue = s.load_value(ftx)?;
	Ok(Value::from(
		utf8_percent_encode(s.as_ref(), NON_ALPHANUMERIC).to_string(),
	))
}

fn urldecode<'a>(ftx: &mut FunctionContext<'a, '_>, s: Argument) -> ResolveResult<'a> {
	let s: StringValue = s.load_value(ftx)?;
	let decoded = percent_decode_str(s.as_ref())
		.decode_utf8()
		.map_err(|e| ftx.error(e))?;
	Ok(Value::from(decoded.into_owned()))
}

/// `substr(s, i, n)`: `n` bytes starting at byte offset `i`, clamped to the
/// string's length (never panics on out-of-range offsets).
fn substr<'a>(
	ftx: &mut FunctionContext<'a, '_>,
	s: Argument,
	i: Argument,
	n: Argument,
) -> ResolveResult<'a> {
	let s: StringValue = s.load_value(ftx)?;
	let i = i.load(ftx)?.as_unsigned()?;
	let n = n.load(ftx)?.as_unsigned()?;
	let bytes = s.as_ref().as_bytes();
	let start = i.min(bytes.len());
	let end = start.saturating_add(n).min(bytes.len());
	Ok(Value::from(String::from_utf8_lossy(&bytes[start..end]).into_owned()))
}

/// Index of the second logical argument (`needle`), given that `haystack` was
/// read via `this_or_arg`: when called as a method the receiver supplies
/// `haystack` and `needle` is the sole parenthesized arg (index 0); called as
/// a free function both are parenthesized args, so `needle` is index 1.
fn second_arg_index(ftx: &FunctionContext<'_, '_>) -> usize {
	if ftx.this.is_some() { 0 } else { 1 }
}

/// `bcontains(haystack, needle)` / `haystack.bcontains(needle)`: true if
/// `needle` occurs anywhere in `haystack`'s bytes.
fn bcontains<'a>(ftx: &mut FunctionContext<'a, '_>, haystack: This) -> ResolveResult<'a> {
	let haystack: BytesValue = haystack.load_or_arg(ftx)?;
	let needle: BytesValue = ftx.arg(second_arg_index(ftx))?;
	Ok(Value::Bool(bytes_contains(haystack.as_ref(), needle.as_ref())))
}

/// `icontains(haystack, needle)` / `haystack.icontains(needle)`: case-insensitive
/// substring check.
fn icontains<'a>(ftx: &mut FunctionContext<'a, '_>, haystack: This) -> ResolveResult<'a> {
	let haystack: StringValue = haystack.load_or_arg(ftx)?;
	let needle: StringValue = ftx.arg(second_arg_index(ftx))?;
	Ok(Value::Bool(
		haystack
			.as_ref()
			.to_lowercase()
			.contains(&needle.as_ref().to_lowercase()),
	))
}

fn bytes_contains(haystack: &[u8], needle: &[u8]) -> bool {
	if needle.is_empty() {
		return true;
	}
	haystack.windows(needle.len()).any(|w| w == needle)
}

fn random_int<'a>(ftx: &mut FunctionContext<'a, '_>, n: Argument) -> ResolveResult<'a> {
	let n = n.load(ftx)?.as_unsigned()?;
	if n == 0 {
		return Ok(Value::Int(0));
	}
	Ok(Value::Int(random_range(0..n as i64)))
}

fn random_lowercase<'a>(ftx: &mut FunctionContext<'a, '_>, n: Argument) -> ResolveResult<'a> {
	Ok(Value::from(random_alphabet(
		n.load(ftx)?.as_unsigned()?,
		b"abcdefghijklmnopqrstuvwxyz",
	)))
}

fn random_uppercase<'a>(ftx: &mut FunctionContext<'a, '_>, n: Argument) -> ResolveResult<'a> {
	Ok(Value::from(random_alphabet(
		n.load(ftx)?.as_unsigned()?,
		b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
	)))
}

fn random_alphabet(n: usize, alphabet: &[u8]) -> String {
	(0..n)
		.map(|_| alphabet[random_range(0..alphabet.len())] as char)
		.collect()
}

/// `printable(b)`: true if every byte is a printable ASCII character.
fn printable<'a>(ftx: &mut FunctionContext<'a, '_>, b: Argument) -> ResolveResult<'a> {
	let bytes = value_bytes(&b.load(ftx)?, ftx)?;
	Ok(Value::Bool(
		bytes.iter().all(|b| (0x20..=0x7e).contains(b)),
	))
}

/// `sleep(n)`: blocks the evaluating thread for `n` seconds. The runtime
/// evaluates expressions inside a blocking task, never the async reactor, so
/// a direct thread sleep is safe here.
fn sleep<'a>(ftx: &mut FunctionContext<'a, '_>, n: Argument) -> ResolveResult<'a> {
	let n = n.load(ftx)?.as_unsigned()?;
	std::thread::sleep(std::time::Duration::from_secs(n as u64));
	Ok(Value::Null)
}

fn value_bytes(v: &Value, ftx: &FunctionContext) -> Result<Vec<u8>, cel::ExecutionError> {
	match v {
		Value::String(s) => Ok(s.as_ref().as_bytes().to_vec()),
		Value::Bytes(b) => Ok(b.as_ref().to_vec()),
		other => Err(ftx.error(format!("expected string or bytes, got {other:?}"))),
	}
}
