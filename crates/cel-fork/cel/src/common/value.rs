use std::sync::Arc;

/// A literal value as produced directly by the parser, before any variable
/// or function resolution has happened. Kept distinct from
/// [`crate::Value`] so that `Expr::Literal` nodes stay cheap to clone and
/// don't carry the runtime-only variants (`Dynamic`, `Object`, ...).
#[derive(Clone, Debug, PartialEq)]
pub enum CelVal {
	Int(i64),
	UInt(u64),
	Double(f64),
	String(Arc<str>),
	Bytes(Arc<[u8]>),
	Boolean(bool),
	Null,
}
