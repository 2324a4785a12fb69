//! The PoC execution's variable map: bindings accumulated from `set`, the
//! current `payloads` entry, rule `output`s, and rule-result functions. Lives
//! for the duration of one PoC execution and is never shared between
//! executions.

use cel::context::VariableResolver;
use cel::Value;
use indexmap::IndexMap;

#[derive(Default, Clone)]
pub struct VariableMap {
	values: IndexMap<String, Value<'static>>,
}

impl VariableMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, name: impl Into<String>, value: Value<'static>) {
		self.values.insert(name.into(), value);
	}

	pub fn get(&self, name: &str) -> Option<&Value<'static>> {
		self.values.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.values.contains_key(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value<'static>)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// A [`VariableResolver`] snapshotting the current bindings, for one
	/// expression evaluation. The evaluator's environment is re-created fresh
	/// at each binding/rule/final-expression staging point rather than reused.
	pub fn as_resolver(&self) -> VariableMapResolver<'_> {
		VariableMapResolver(self)
	}
}

pub struct VariableMapResolver<'a>(&'a VariableMap);

impl<'a> VariableResolver<'a> for VariableMapResolver<'a> {
	fn resolve(&self, expr: &str) -> Option<Value<'a>> {
		self.0.values.get(expr).cloned()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_bound_names_and_nothing_else() {
		let mut vars = VariableMap::new();
		vars.insert("target", Value::from("https://example.com"));
		let resolver = vars.as_resolver();
		assert_eq!(resolver.resolve("target"), Some(Value::from("https://example.com")));
		assert!(resolver.resolve("missing").is_none());
	}
}
