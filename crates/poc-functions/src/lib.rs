use cel::Context;

mod general;
mod poc;
mod reverse;
mod strings;

/// Registers every PoC-dialect function against a fresh [`Context`]. The
/// runtime calls this exactly once per freshly-built environment, never
/// reusing a `Context` across evaluation points.
pub fn insert_all(ctx: &mut Context) {
	// General-purpose helpers: base64 aliasing, `default`, `regexReplace`,
	// `fail`, `with`.
	general::insert_all(ctx);
	// "Strings" extension
	// https://pkg.go.dev/github.com/google/cel-go/ext#Strings
	strings::insert_all(ctx);
	// Out-of-band reverse token functions.
	reverse::insert_all(ctx);
	// PoC-specific byte/string helpers.
	poc::insert_all(ctx);
}
