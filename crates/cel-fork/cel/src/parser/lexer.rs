//! Tokenizer for the expression dialect. Produces a flat token stream the
//! recursive-descent parser in [`super`] consumes one token at a time.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
	Ident(String),
	Int(i64),
	UInt(u64),
	Float(f64),
	Str(String),
	Bytes(Vec<u8>),

	Dot,
	Comma,
	Colon,
	Question,
	LParen,
	RParen,
	LBracket,
	RBracket,
	LBrace,
	RBrace,

	Plus,
	Minus,
	Star,
	Slash,
	Percent,
	Bang,

	EqEq,
	NotEq,
	Less,
	LessEq,
	Greater,
	GreaterEq,
	AndAnd,
	OrOr,

	Eof,
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Ident(s) => write!(f, "identifier '{s}'"),
			Token::Int(v) => write!(f, "int literal '{v}'"),
			Token::UInt(v) => write!(f, "uint literal '{v}'"),
			Token::Float(v) => write!(f, "float literal '{v}'"),
			Token::Str(_) => write!(f, "string literal"),
			Token::Bytes(_) => write!(f, "bytes literal"),
			Token::Dot => write!(f, "'.'"),
			Token::Comma => write!(f, "','"),
			Token::Colon => write!(f, "':'"),
			Token::Question => write!(f, "'?'"),
			Token::LParen => write!(f, "'('"),
			Token::RParen => write!(f, "')'"),
			Token::LBracket => write!(f, "'['"),
			Token::RBracket => write!(f, "']'"),
			Token::LBrace => write!(f, "'{{'"),
			Token::RBrace => write!(f, "'}}'"),
			Token::Plus => write!(f, "'+'"),
			Token::Minus => write!(f, "'-'"),
			Token::Star => write!(f, "'*'"),
			Token::Slash => write!(f, "'/'"),
			Token::Percent => write!(f, "'%'"),
			Token::Bang => write!(f, "'!'"),
			Token::EqEq => write!(f, "'=='"),
			Token::NotEq => write!(f, "'!='"),
			Token::Less => write!(f, "'<'"),
			Token::LessEq => write!(f, "'<='"),
			Token::Greater => write!(f, "'>'"),
			Token::GreaterEq => write!(f, "'>='"),
			Token::AndAnd => write!(f, "'&&'"),
			Token::OrOr => write!(f, "'||'"),
			Token::Eof => write!(f, "end of input"),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Spanned {
	pub(crate) token: Token,
	pub(crate) pos: usize,
}

pub(crate) struct Lexer<'a> {
	src: &'a str,
	bytes: &'a [u8],
	pos: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LexError {
	pub(crate) message: String,
	pub(crate) pos: usize,
}

impl<'a> Lexer<'a> {
	pub(crate) fn new(src: &'a str) -> Self {
		Lexer {
			src,
			bytes: src.as_bytes(),
			pos: 0,
		}
	}

	pub(crate) fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
		let mut out = Vec::new();
		loop {
			self.skip_whitespace_and_comments();
			let pos = self.pos;
			let Some(c) = self.peek() else {
				out.push(Spanned { token: Token::Eof, pos });
				return Ok(out);
			};
			let token = match c {
				'(' => {
					self.advance();
					Token::LParen
				},
				')' => {
					self.advance();
					Token::RParen
				},
				'[' => {
					self.advance();
					Token::LBracket
				},
				']' => {
					self.advance();
					Token::RBracket
				},
				'{' => {
					self.advance();
					Token::LBrace
				},
				'}' => {
					self.advance();
					Token::RBrace
				},
				',' => {
					self.advance();
					Token::Comma
				},
				':' => {
					self.advance();
					Token::Colon
				},
				'?' => {
					self.advance();
					Token::Question
				},
				'.' => {
					self.advance();
					Token::Dot
				},
				'+' => {
					self.advance();
					Token::Plus
				},
				'-' => {
					self.advance();
					Token::Minus
				},
				'*' => {
					self.advance();
					Token::Star
				},
				'/' => {
					self.advance();
					Token::Slash
				},
				'%' => {
					self.advance();
					Token::Percent
				},
				'!' => {
					self.advance();
					if self.peek() == Some('=') {
						self.advance();
						Token::NotEq
					} else {
						Token::Bang
					}
				},
				'=' => {
					self.advance();
					if self.peek() == Some('=') {
						self.advance();
						Token::EqEq
					} else {
						return Err(LexError {
							message: "expected '==', got bare '='".to_string(),
							pos,
						});
					}
				},
				'<' => {
					self.advance();
					if self.peek() == Some('=') {
						self.advance();
						Token::LessEq
					} else {
						Token::Less
					}
				},
				'>' => {
					self.advance();
					if self.peek() == Some('=') {
						self.advance();
						Token::GreaterEq
					} else {
						Token::Greater
					}
				},
				'&' => {
					self.advance();
					if self.peek() == Some('&') {
						self.advance();
						Token::AndAnd
					} else {
						return Err(LexError {
							message: "expected '&&', got bare '&'".to_string(),
							pos,
						});
					}
				},
				'|' => {
					self.advance();
					if self.peek() == Some('|') {
						self.advance();
						Token::OrOr
					} else {
						return Err(LexError {
							message: "expected '||', got bare '|'".to_string(),
							pos,
						});
					}
				},
				'"' | '\'' => self.lex_string(c, false)?,
				c if c.is_ascii_digit() => self.lex_number()?,
				c if is_ident_start(c) => self.lex_ident_or_prefixed_string()?,
				other => {
					return Err(LexError {
						message: format!("unexpected character '{other}'"),
						pos,
					});
				},
			};
			out.push(Spanned { token, pos });
		}
	}

	fn peek(&self) -> Option<char> {
		self.src[self.pos..].chars().next()
	}

	fn peek_at(&self, n: usize) -> Option<char> {
		self.src[self.pos..].chars().nth(n)
	}

	fn advance(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.pos += c.len_utf8();
		Some(c)
	}

	fn skip_whitespace_and_comments(&mut self) {
		loop {
			match self.peek() {
				Some(c) if c.is_whitespace() => {
					self.advance();
				},
				Some('/') if self.peek_at(1) == Some('/') => {
					while let Some(c) = self.peek() {
						if c == '\n' {
							break;
						}
						self.advance();
					}
				},
				_ => return,
			}
		}
	}

	/// Parses an identifier, or — if it's a `b`/`r` string prefix — a
	/// bytes or raw string literal.
	fn lex_ident_or_prefixed_string(&mut self) -> Result<Token, LexError> {
		let start = self.pos;
		while let Some(c) = self.peek() {
			if is_ident_continue(c) {
				self.advance();
			} else {
				break;
			}
		}
		let ident = &self.src[start..self.pos];
		if (ident == "b" || ident == "r" || ident == "rb" || ident == "br")
			&& matches!(self.peek(), Some('"') | Some('\''))
		{
			let quote = self.peek().unwrap();
			let raw = ident.contains('r');
			let bytes_literal = ident.contains('b');
			self.advance();
			let s = self.lex_string_body(quote, raw)?;
			return Ok(if bytes_literal {
				Token::Bytes(s.into_bytes())
			} else {
				Token::Str(s)
			});
		}
		match ident {
			"true" => Ok(Token::Ident("true".to_string())),
			"false" => Ok(Token::Ident("false".to_string())),
			_ => Ok(Token::Ident(ident.to_string())),
		}
	}

	fn lex_string(&mut self, quote: char, raw: bool) -> Result<Token, LexError> {
		self.advance();
		let s = self.lex_string_body(quote, raw)?;
		Ok(Token::Str(s))
	}

	fn lex_string_body(&mut self, quote: char, raw: bool) -> Result<String, LexError> {
		let start_pos = self.pos;
		let mut out = String::new();
		loop {
			match self.advance() {
				None => {
					return Err(LexError {
						message: "unterminated string literal".to_string(),
						pos: start_pos,
					});
				},
				Some(c) if c == quote => return Ok(out),
				Some('\\') if !raw => {
					let esc = self.advance().ok_or_else(|| LexError {
						message: "unterminated escape sequence".to_string(),
						pos: self.pos,
					})?;
					match esc {
						'n' => out.push('\n'),
						't' => out.push('\t'),
						'r' => out.push('\r'),
						'\\' => out.push('\\'),
						'\'' => out.push('\''),
						'"' => out.push('"'),
						'0' => out.push('\0'),
						'x' | 'X' => {
							let hex: String = (0..2).filter_map(|_| self.advance()).collect();
							let byte = u8::from_str_radix(&hex, 16).map_err(|_| LexError {
								message: format!("invalid \\x escape '{hex}'"),
								pos: self.pos,
							})?;
							out.push(byte as char);
						},
						'u' => {
							let hex: String = (0..4).filter_map(|_| self.advance()).collect();
							let code = u32::from_str_radix(&hex, 16).map_err(|_| LexError {
								message: format!("invalid \\u escape '{hex}'"),
								pos: self.pos,
							})?;
							let c = char::from_u32(code).ok_or_else(|| LexError {
								message: format!("invalid unicode escape '\\u{hex}'"),
								pos: self.pos,
							})?;
							out.push(c);
						},
						other => out.push(other),
					}
				},
				Some(c) => out.push(c),
			}
		}
	}

	fn lex_number(&mut self) -> Result<Token, LexError> {
		let start = self.pos;
		if self.peek() == Some('0') && self.peek_at(1) == Some('x') {
			self.advance();
			self.advance();
			let hex_start = self.pos;
			while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
				self.advance();
			}
			let hex = &self.src[hex_start..self.pos];
			let unsigned = self.peek().is_some_and(|c| c == 'u' || c == 'U');
			if unsigned {
				self.advance();
			}
			let value = u64::from_str_radix(hex, 16).map_err(|e| LexError {
				message: format!("invalid hex literal: {e}"),
				pos: start,
			})?;
			return Ok(if unsigned { Token::UInt(value) } else { Token::Int(value as i64) });
		}

		while self.peek().is_some_and(|c| c.is_ascii_digit()) {
			self.advance();
		}
		let mut is_float = false;
		if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
			is_float = true;
			self.advance();
			while self.peek().is_some_and(|c| c.is_ascii_digit()) {
				self.advance();
			}
		}
		if matches!(self.peek(), Some('e') | Some('E')) {
			let mut lookahead = 1;
			if matches!(self.peek_at(1), Some('+') | Some('-')) {
				lookahead = 2;
			}
			if self.peek_at(lookahead).is_some_and(|c| c.is_ascii_digit()) {
				is_float = true;
				self.advance();
				if matches!(self.peek(), Some('+') | Some('-')) {
					self.advance();
				}
				while self.peek().is_some_and(|c| c.is_ascii_digit()) {
					self.advance();
				}
			}
		}
		let text = &self.src[start..self.pos];
		if is_float {
			let value = text.parse::<f64>().map_err(|e| LexError {
				message: format!("invalid float literal '{text}': {e}"),
				pos: start,
			})?;
			return Ok(Token::Float(value));
		}
		let unsigned = matches!(self.peek(), Some('u') | Some('U'));
		if unsigned {
			self.advance();
			let value = text.parse::<u64>().map_err(|e| LexError {
				message: format!("invalid uint literal '{text}': {e}"),
				pos: start,
			})?;
			return Ok(Token::UInt(value));
		}
		let value = text.parse::<i64>().map_err(|e| LexError {
			message: format!("invalid int literal '{text}': {e}"),
			pos: start,
		})?;
		Ok(Token::Int(value))
	}
}

fn is_ident_start(c: char) -> bool {
	c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}
