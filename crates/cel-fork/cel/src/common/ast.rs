//! The expression tree the parser produces and `objects::Value::resolve`
//! walks. Every node is wrapped in [`IdedExpr`] so later passes (the
//! optimizer, error messages) can refer back to a stable node id.

use http::HeaderName;

use crate::common::value::CelVal;
use crate::objects::Value;

/// Well-known function names used for operators desugared by the parser.
/// Mirrors the naming convention of the CEL spec's own operator identifiers
/// (e.g. `cel.dev/expr`'s `_+_`, `_==_`) so error messages and the
/// optimizer's pattern matches read the same way upstream CEL's do.
pub mod operators {
	pub const CONDITIONAL: &str = "_?_:_";
	pub const LOGICAL_OR: &str = "_||_";
	pub const LOGICAL_AND: &str = "_&&_";
	pub const LOGICAL_NOT: &str = "!_";
	pub const EQUALS: &str = "_==_";
	pub const NOT_EQUALS: &str = "_!=_";
	pub const LESS: &str = "_<_";
	pub const LESS_EQUALS: &str = "_<=_";
	pub const GREATER: &str = "_>_";
	pub const GREATER_EQUALS: &str = "_>=_";
	pub const IN: &str = "@in";
	pub const ADD: &str = "_+_";
	pub const SUBSTRACT: &str = "_-_";
	pub const MULTIPLY: &str = "_*_";
	pub const DIVIDE: &str = "_/_";
	pub const MODULO: &str = "_%_";
	pub const NEGATE: &str = "-_";
	pub const INDEX: &str = "_[_]";
	pub const OPT_INDEX: &str = "_[?_]";
	pub const OPT_SELECT: &str = "_?._";
	pub const NOT_STRICTLY_FALSE: &str = "@not_strictly_false";
}

/// An expression node tagged with a stable id, assigned by the parser in
/// source order. The id survives optimization passes so diagnostics can
/// still point back at the originally-parsed node.
#[derive(Clone, Debug, PartialEq)]
pub struct IdedExpr {
	pub id: u64,
	pub expr: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IdedEntryExpr {
	pub id: u64,
	pub expr: EntryExpr,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
	/// A node the optimizer has rewritten into a specialized form, keeping
	/// the original around as a fallback for when the specialization
	/// doesn't apply (see `OptimizedExpr::HeaderLookup`).
	Optimized {
		original: Box<IdedExpr>,
		optimized: OptimizedExpr,
	},
	/// A literal as written in the source, not yet converted to a runtime
	/// [`Value`].
	Literal(CelVal),
	/// A value already materialized by a previous optimization pass.
	Inline(Value<'static>),
	Call(CallExpr),
	Ident(String),
	Select(SelectExpr),
	List(ListExpr),
	Map(MapExpr),
	Comprehension(Box<ComprehensionExpr>),
	Struct(Box<StructExpr>),
	/// Sentinel for a node that was never assigned an expression; only
	/// ever constructed as a placeholder and never evaluated.
	Unspecified,
}

impl Expr {
	/// A short, human-readable label for this node's kind, used in error
	/// messages (e.g. "expected identifier, got call").
	pub fn type_name(&self) -> &'static str {
		match self {
			Expr::Optimized { .. } => "optimized",
			Expr::Literal(_) => "literal",
			Expr::Inline(_) => "literal",
			Expr::Call(_) => "call",
			Expr::Ident(_) => "identifier",
			Expr::Select(_) => "select",
			Expr::List(_) => "list",
			Expr::Map(_) => "map",
			Expr::Comprehension(_) => "comprehension",
			Expr::Struct(_) => "struct",
			Expr::Unspecified => "unspecified",
		}
	}
}

/// A pre-specialized form of an expression, computed once by
/// [`crate::Optimizer`] so hot-path lookups (request/response header reads)
/// skip the general `Expr::Select`/index resolution machinery.
#[derive(Clone, Debug, PartialEq)]
pub enum OptimizedExpr {
	HeaderLookup { request: bool, header: HeaderName },
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpr {
	pub target: Option<Box<IdedExpr>>,
	pub func_name: String,
	pub args: Vec<IdedExpr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectExpr {
	pub operand: Box<IdedExpr>,
	pub field: String,
	/// `true` for the `has(x.field)` presence-test form; `false` for a
	/// normal field access.
	pub test: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListExpr {
	pub elements: Vec<IdedExpr>,
	pub optional_indices: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapExpr {
	pub entries: Vec<IdedEntryExpr>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EntryExpr {
	StructField(StructFieldExpr),
	MapEntry(MapEntryExpr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapEntryExpr {
	pub key: IdedExpr,
	pub value: IdedExpr,
	pub optional: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructFieldExpr {
	pub field: String,
	pub value: IdedExpr,
	pub optional: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructExpr {
	pub type_name: String,
	pub entries: Vec<IdedEntryExpr>,
}

/// Desugared form of the `map`/`filter`/`all`/`exists` macros: iterate
/// `iter_range`, binding each element to `iter_var`, updating `accu_var`
/// via `loop_step` as long as `loop_cond` holds, then evaluate `result`.
/// Not produced by this crate's parser (the PoC dialect has no
/// comprehension macros); kept so `Value::resolve` has somewhere to route
/// an AST built by a custom [`crate::Optimizer`] or embedder.
#[derive(Clone, Debug, PartialEq)]
pub struct ComprehensionExpr {
	pub iter_range: IdedExpr,
	pub iter_var: String,
	pub iter_var2: Option<String>,
	pub accu_var: String,
	pub accu_init: IdedExpr,
	pub loop_cond: IdedExpr,
	pub loop_step: IdedExpr,
	pub result: IdedExpr,
}
