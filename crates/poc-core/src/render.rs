//! `{{name}}` template substitution. A distinct, much simpler mechanism from
//! the expression evaluator: a plain token replace over the current variable
//! map, not a general expression feature.

use crate::value::{default_string, is_string_map};
use crate::varmap::VariableMap;

/// Replaces every `{{name}}` occurrence in `s` with the default string
/// representation of `vars[name]`, for every bound name whose value is not a
/// mapping-of-string. Unknown `{{…}}` placeholders are
/// left untouched. A single left-to-right pass over the bindings is already a
/// fixed point: each substitution consumes its own token, so re-rendering an
/// already-rendered string is a no-op.
pub fn render(s: &str, vars: &VariableMap) -> String {
	if !s.contains("{{") {
		return s.to_string();
	}
	let mut out = s.to_string();
	for (name, value) in vars.iter() {
		if is_string_map(value) {
			continue;
		}
		let token = format!("{{{{{name}}}}}");
		if out.contains(&token) {
			out = out.replace(&token, &default_string(value));
		}
	}
	out
}
