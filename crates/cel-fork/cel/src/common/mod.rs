//! AST and literal-value types shared between the parser and the evaluator
//! (`objects::Value::resolve`).

pub mod ast;
pub mod value;
