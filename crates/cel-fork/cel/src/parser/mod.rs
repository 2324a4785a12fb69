//! A recursive-descent parser for the expression dialect: literals (int,
//! uint, float, string, bytes, bool, null), arithmetic, comparison, logical
//! operators, indexing, field selection, method/function calls, list and
//! map literals, and the `has()` presence macro.
//!
//! This is deliberately narrower than full CEL — no comprehension macros
//! (`map`/`filter`/`all`/`exists`), no optional-chaining syntax (`?.`,
//! `[?`, `?"key":`), no struct-literal construction. The expression dialect
//! this crate evaluates has no use for a general scripting language's
//! macros; see `common::ast::ComprehensionExpr` and `common::ast::StructExpr`
//! for the AST shapes kept around for embedders that build their own trees.

mod lexer;

use std::cell::Cell;
use std::collections::HashSet;
use std::fmt;

use self::lexer::{LexError, Lexer, Token};
use crate::common::ast::{
	CallExpr, EntryExpr, Expr, IdedEntryExpr, IdedExpr, ListExpr, MapEntryExpr, MapExpr,
	SelectExpr, operators,
};
use crate::common::value::CelVal;

/// The parsed form of an expression, tagged with stable per-node ids.
pub type Expression = IdedExpr;

/// A single parse failure, with the byte offset it was found at.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
	pub message: String,
	pub position: usize,
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} (at byte {})", self.message, self.position)
	}
}

impl std::error::Error for ParseError {}

/// All errors encountered parsing one expression. Parsing stops at the
/// first error, so today this always holds exactly one, but downstream
/// code (and upstream CEL implementations) treat it as a collection.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseErrors(pub Vec<ParseError>);

impl fmt::Display for ParseErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, e) in self.0.iter().enumerate() {
			if i > 0 {
				writeln!(f)?;
			}
			write!(f, "{e}")?;
		}
		Ok(())
	}
}

impl std::error::Error for ParseErrors {}

impl From<LexError> for ParseErrors {
	fn from(e: LexError) -> Self {
		ParseErrors(vec![ParseError { message: e.message, position: e.pos }])
	}
}

/// The variables and functions an expression references, collected by
/// walking its AST once after parsing.
#[derive(Debug, Default)]
pub struct ExpressionReferences<'e> {
	variables: HashSet<&'e str>,
	functions: HashSet<&'e str>,
}

impl<'e> ExpressionReferences<'e> {
	pub fn has_variable(&self, name: &str) -> bool {
		self.variables.contains(name)
	}

	pub fn has_function(&self, name: &str) -> bool {
		self.functions.contains(name)
	}

	pub fn variables(&self) -> &HashSet<&'e str> {
		&self.variables
	}

	pub fn functions(&self) -> &HashSet<&'e str> {
		&self.functions
	}
}

impl IdedExpr {
	/// Walks this expression's tree, collecting every identifier and
	/// function-call name it references.
	pub fn references(&self) -> ExpressionReferences<'_> {
		let mut refs = ExpressionReferences::default();
		collect_references(self, &mut refs);
		refs
	}
}

fn collect_references<'e>(expr: &'e IdedExpr, refs: &mut ExpressionReferences<'e>) {
	match &expr.expr {
		Expr::Optimized { original, .. } => collect_references(original, refs),
		Expr::Literal(_) | Expr::Inline(_) | Expr::Unspecified => {},
		Expr::Ident(name) => {
			refs.variables.insert(name.as_str());
		},
		Expr::Call(call) => {
			refs.functions.insert(call.func_name.as_str());
			if let Some(target) = &call.target {
				collect_references(target, refs);
			}
			for arg in &call.args {
				collect_references(arg, refs);
			}
		},
		Expr::Select(select) => collect_references(&select.operand, refs),
		Expr::List(list) => {
			for e in &list.elements {
				collect_references(e, refs);
			}
		},
		Expr::Map(map) => {
			for entry in &map.entries {
				match &entry.expr {
					EntryExpr::MapEntry(e) => {
						collect_references(&e.key, refs);
						collect_references(&e.value, refs);
					},
					EntryExpr::StructField(f) => collect_references(&f.value, refs),
				}
			}
		},
		Expr::Comprehension(c) => {
			collect_references(&c.iter_range, refs);
			collect_references(&c.accu_init, refs);
			collect_references(&c.loop_cond, refs);
			collect_references(&c.loop_step, refs);
			collect_references(&c.result, refs);
		},
		Expr::Struct(s) => {
			for entry in &s.entries {
				match &entry.expr {
					EntryExpr::MapEntry(e) => {
						collect_references(&e.key, refs);
						collect_references(&e.value, refs);
					},
					EntryExpr::StructField(f) => collect_references(&f.value, refs),
				}
			}
		},
	}
}

/// Builds [`Expression`] trees from source text.
#[derive(Clone, Copy, Debug, Default)]
pub struct Parser {
	enable_optional_syntax: bool,
}

impl Parser {
	/// Accepted for source compatibility with upstream CEL parsers; this
	/// crate's grammar never produces optional-chaining nodes regardless of
	/// this setting; see the module docs.
	pub fn enable_optional_syntax(mut self, enabled: bool) -> Self {
		self.enable_optional_syntax = enabled;
		self
	}

	pub fn parse(&self, source: &str) -> Result<Expression, ParseErrors> {
		let tokens = Lexer::new(source).tokenize()?;
		let mut state = ParserState { tokens, pos: 0, next_id: Cell::new(0) };
		let expr = state.parse_expr().map_err(|e| ParseErrors(vec![e]))?;
		state.expect_eof().map_err(|e| ParseErrors(vec![e]))?;
		Ok(expr)
	}
}

struct ParserState {
	tokens: Vec<lexer::Spanned>,
	pos: usize,
	next_id: Cell<u64>,
}

type PResult<T> = Result<T, ParseError>;

impl ParserState {
	fn next_id(&self) -> u64 {
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		id
	}

	fn ided(&self, expr: Expr) -> IdedExpr {
		IdedExpr { id: self.next_id(), expr }
	}

	fn peek(&self) -> &Token {
		&self.tokens[self.pos].token
	}

	fn pos_here(&self) -> usize {
		self.tokens[self.pos].pos
	}

	fn advance(&mut self) -> Token {
		let tok = self.tokens[self.pos].token.clone();
		if self.pos + 1 < self.tokens.len() {
			self.pos += 1;
		}
		tok
	}

	fn expect(&mut self, expected: &Token) -> PResult<()> {
		if self.peek() == expected {
			self.advance();
			Ok(())
		} else {
			Err(self.unexpected(&expected.to_string()))
		}
	}

	fn expect_eof(&mut self) -> PResult<()> {
		if matches!(self.peek(), Token::Eof) {
			Ok(())
		} else {
			Err(self.unexpected("end of input"))
		}
	}

	fn unexpected(&self, expected: &str) -> ParseError {
		ParseError {
			message: format!("expected {expected}, found {}", self.peek()),
			position: self.pos_here(),
		}
	}

	fn parse_expr(&mut self) -> PResult<IdedExpr> {
		let cond = self.parse_or()?;
		if matches!(self.peek(), Token::Question) {
			self.advance();
			let then_branch = self.parse_or()?;
			self.expect(&Token::Colon)?;
			let else_branch = self.parse_expr()?;
			return Ok(self.ided(Expr::Call(CallExpr {
				target: None,
				func_name: operators::CONDITIONAL.to_string(),
				args: vec![cond, then_branch, else_branch],
			})));
		}
		Ok(cond)
	}

	fn parse_or(&mut self) -> PResult<IdedExpr> {
		let mut left = self.parse_and()?;
		while matches!(self.peek(), Token::OrOr) {
			self.advance();
			let right = self.parse_and()?;
			left = self.ided(Expr::Call(CallExpr {
				target: None,
				func_name: operators::LOGICAL_OR.to_string(),
				args: vec![left, right],
			}));
		}
		Ok(left)
	}

	fn parse_and(&mut self) -> PResult<IdedExpr> {
		let mut left = self.parse_relation()?;
		while matches!(self.peek(), Token::AndAnd) {
			self.advance();
			let right = self.parse_relation()?;
			left = self.ided(Expr::Call(CallExpr {
				target: None,
				func_name: operators::LOGICAL_AND.to_string(),
				args: vec![left, right],
			}));
		}
		Ok(left)
	}

	fn parse_relation(&mut self) -> PResult<IdedExpr> {
		let left = self.parse_addition()?;
		let op = match self.peek() {
			Token::EqEq => operators::EQUALS,
			Token::NotEq => operators::NOT_EQUALS,
			Token::Less => operators::LESS,
			Token::LessEq => operators::LESS_EQUALS,
			Token::Greater => operators::GREATER,
			Token::GreaterEq => operators::GREATER_EQUALS,
			Token::Ident(name) if name == "in" => operators::IN,
			_ => return Ok(left),
		};
		self.advance();
		let right = self.parse_addition()?;
		Ok(self.ided(Expr::Call(CallExpr {
			target: None,
			func_name: op.to_string(),
			args: vec![left, right],
		})))
	}

	fn parse_addition(&mut self) -> PResult<IdedExpr> {
		let mut left = self.parse_multiplication()?;
		loop {
			let op = match self.peek() {
				Token::Plus => operators::ADD,
				Token::Minus => operators::SUBSTRACT,
				_ => break,
			};
			self.advance();
			let right = self.parse_multiplication()?;
			left = self.ided(Expr::Call(CallExpr {
				target: None,
				func_name: op.to_string(),
				args: vec![left, right],
			}));
		}
		Ok(left)
	}

	fn parse_multiplication(&mut self) -> PResult<IdedExpr> {
		let mut left = self.parse_unary()?;
		loop {
			let op = match self.peek() {
				Token::Star => operators::MULTIPLY,
				Token::Slash => operators::DIVIDE,
				Token::Percent => operators::MODULO,
				_ => break,
			};
			self.advance();
			let right = self.parse_unary()?;
			left = self.ided(Expr::Call(CallExpr {
				target: None,
				func_name: op.to_string(),
				args: vec![left, right],
			}));
		}
		Ok(left)
	}

	fn parse_unary(&mut self) -> PResult<IdedExpr> {
		match self.peek() {
			Token::Bang => {
				self.advance();
				let operand = self.parse_unary()?;
				Ok(self.ided(Expr::Call(CallExpr {
					target: None,
					func_name: operators::LOGICAL_NOT.to_string(),
					args: vec![operand],
				})))
			},
			Token::Minus => {
				self.advance();
				let operand = self.parse_unary()?;
				Ok(self.ided(Expr::Call(CallExpr {
					target: None,
					func_name: operators::NEGATE.to_string(),
					args: vec![operand],
				})))
			},
			_ => self.parse_postfix(),
		}
	}

	fn parse_postfix(&mut self) -> PResult<IdedExpr> {
		let mut expr = self.parse_primary()?;
		loop {
			match self.peek() {
				Token::Dot => {
					self.advance();
					let field = self.expect_ident()?;
					if matches!(self.peek(), Token::LParen) {
						self.advance();
						let args = self.parse_args(Token::RParen)?;
						expr = self.finish_call(Some(expr), field, args);
					} else {
						expr = self.ided(Expr::Select(SelectExpr {
							operand: Box::new(expr),
							field,
							test: false,
						}));
					}
				},
				Token::LBracket => {
					self.advance();
					let index = self.parse_expr()?;
					self.expect(&Token::RBracket)?;
					expr = self.ided(Expr::Call(CallExpr {
						target: None,
						func_name: operators::INDEX.to_string(),
						args: vec![expr, index],
					}));
				},
				_ => break,
			}
		}
		Ok(expr)
	}

	/// Builds the call node for `target.name(args)` (or `name(args)` when
	/// `target` is `None`), special-casing the `has()` presence macro.
	fn finish_call(&self, target: Option<IdedExpr>, name: String, args: Vec<IdedExpr>) -> IdedExpr {
		if target.is_none() && name == "has" && args.len() == 1 {
			if let Expr::Select(select) = args.into_iter().next().unwrap().expr {
				return self.ided(Expr::Select(SelectExpr { test: true, ..select }));
			}
			// `has()` on anything but a field select has no meaning; fall
			// through and let evaluation reject it as an ordinary call to an
			// undeclared function named `has`.
			return self.ided(Expr::Call(CallExpr {
				target: None,
				func_name: "has".to_string(),
				args: vec![],
			}));
		}
		self.ided(Expr::Call(CallExpr {
			target: target.map(Box::new),
			func_name: name,
			args,
		}))
	}

	fn parse_args(&mut self, close: Token) -> PResult<Vec<IdedExpr>> {
		let mut args = Vec::new();
		if self.peek() == &close {
			self.advance();
			return Ok(args);
		}
		loop {
			args.push(self.parse_expr()?);
			match self.peek() {
				Token::Comma => {
					self.advance();
					if self.peek() == &close {
						self.advance();
						break;
					}
				},
				t if t == &close => {
					self.advance();
					break;
				},
				_ => return Err(self.unexpected(&close.to_string())),
			}
		}
		Ok(args)
	}

	fn expect_ident(&mut self) -> PResult<String> {
		match self.advance() {
			Token::Ident(name) => Ok(name),
			other => Err(ParseError {
				message: format!("expected identifier, found {other}"),
				position: self.pos_here(),
			}),
		}
	}

	fn parse_primary(&mut self) -> PResult<IdedExpr> {
		match self.peek().clone() {
			Token::Int(v) => {
				self.advance();
				Ok(self.ided(Expr::Literal(CelVal::Int(v))))
			},
			Token::UInt(v) => {
				self.advance();
				Ok(self.ided(Expr::Literal(CelVal::UInt(v))))
			},
			Token::Float(v) => {
				self.advance();
				Ok(self.ided(Expr::Literal(CelVal::Double(v))))
			},
			Token::Str(s) => {
				self.advance();
				Ok(self.ided(Expr::Literal(CelVal::String(s.into()))))
			},
			Token::Bytes(b) => {
				self.advance();
				Ok(self.ided(Expr::Literal(CelVal::Bytes(b.into()))))
			},
			Token::LParen => {
				self.advance();
				let inner = self.parse_expr()?;
				self.expect(&Token::RParen)?;
				Ok(inner)
			},
			Token::LBracket => {
				self.advance();
				let elements = self.parse_args(Token::RBracket)?;
				Ok(self.ided(Expr::List(ListExpr { elements, optional_indices: vec![] })))
			},
			Token::LBrace => {
				self.advance();
				self.parse_map_literal()
			},
			Token::Ident(name) => {
				self.advance();
				match name.as_str() {
					"true" => Ok(self.ided(Expr::Literal(CelVal::Boolean(true)))),
					"false" => Ok(self.ided(Expr::Literal(CelVal::Boolean(false)))),
					"null" => Ok(self.ided(Expr::Literal(CelVal::Null))),
					_ => {
						if matches!(self.peek(), Token::LParen) {
							self.advance();
							let args = self.parse_args(Token::RParen)?;
							Ok(self.finish_call(None, name, args))
						} else {
							Ok(self.ided(Expr::Ident(name)))
						}
					},
				}
			},
			_ => Err(self.unexpected("an expression")),
		}
	}

	fn parse_map_literal(&mut self) -> PResult<IdedExpr> {
		let mut entries = Vec::new();
		if matches!(self.peek(), Token::RBrace) {
			self.advance();
			return Ok(self.ided(Expr::Map(MapExpr { entries })));
		}
		loop {
			let key = self.parse_expr()?;
			self.expect(&Token::Colon)?;
			let value = self.parse_expr()?;
			let id = self.next_id();
			entries.push(IdedEntryExpr {
				id,
				expr: EntryExpr::MapEntry(MapEntryExpr { key, value, optional: false }),
			});
			match self.peek() {
				Token::Comma => {
					self.advance();
					if matches!(self.peek(), Token::RBrace) {
						self.advance();
						break;
					}
				},
				Token::RBrace => {
					self.advance();
					break;
				},
				_ => return Err(self.unexpected("',' or '}'")),
			}
		}
		Ok(self.ided(Expr::Map(MapExpr { entries })))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(src: &str) -> IdedExpr {
		Parser::default().parse(src).unwrap_or_else(|e| panic!("{src}: {e}"))
	}

	#[test]
	fn parses_literals() {
		assert!(matches!(parse("1").expr, Expr::Literal(CelVal::Int(1))));
		assert!(matches!(parse("1u").expr, Expr::Literal(CelVal::UInt(1))));
		assert!(matches!(parse("1.5").expr, Expr::Literal(CelVal::Double(v)) if v == 1.5));
		assert!(matches!(parse("true").expr, Expr::Literal(CelVal::Boolean(true))));
		assert!(matches!(parse("null").expr, Expr::Literal(CelVal::Null)));
	}

	#[test]
	fn parses_arithmetic_precedence() {
		let expr = parse("1 + 2 * 3");
		let Expr::Call(call) = expr.expr else { panic!("expected call") };
		assert_eq!(call.func_name, operators::ADD);
		assert!(matches!(call.args[0].expr, Expr::Literal(CelVal::Int(1))));
		assert!(matches!(&call.args[1].expr, Expr::Call(inner) if inner.func_name == operators::MULTIPLY));
	}

	#[test]
	fn parses_method_call() {
		let expr = parse(r#"response.body.bcontains(b"abc")"#);
		let Expr::Call(call) = expr.expr else { panic!("expected call") };
		assert_eq!(call.func_name, "bcontains");
		assert!(call.target.is_some());
	}

	#[test]
	fn parses_ternary() {
		let expr = parse("true ? 1 : 2");
		let Expr::Call(call) = expr.expr else { panic!("expected call") };
		assert_eq!(call.func_name, operators::CONDITIONAL);
		assert_eq!(call.args.len(), 3);
	}

	#[test]
	fn parses_has_macro() {
		let expr = parse("has(foo.bar)");
		let Expr::Select(select) = expr.expr else { panic!("expected select") };
		assert!(select.test);
		assert_eq!(select.field, "bar");
	}

	#[test]
	fn parses_index_and_list() {
		let expr = parse("[1, 2, 3][0]");
		let Expr::Call(call) = expr.expr else { panic!("expected call") };
		assert_eq!(call.func_name, operators::INDEX);
		assert!(matches!(call.args[0].expr, Expr::List(_)));
	}

	#[test]
	fn parses_map_literal() {
		let expr = parse(r#"{"a": 1, "b": 2}"#);
		let Expr::Map(map) = expr.expr else { panic!("expected map") };
		assert_eq!(map.entries.len(), 2);
	}

	#[test]
	fn parses_membership_and_in() {
		let expr = parse(r#""a" in ["a", "b"]"#);
		let Expr::Call(call) = expr.expr else { panic!("expected call") };
		assert_eq!(call.func_name, operators::IN);
	}

	#[test]
	fn rejects_trailing_garbage() {
		assert!(Parser::default().parse("1 +").is_err());
		assert!(Parser::default().parse("1 1").is_err());
	}

	#[test]
	fn qualified_call_parses_as_select_target() {
		let expr = parse("optional.of(1)");
		let Expr::Call(call) = expr.expr else { panic!("expected call") };
		assert_eq!(call.func_name, "of");
		assert!(matches!(&call.target.unwrap().expr, Expr::Ident(name) if name == "optional"));
	}
}
