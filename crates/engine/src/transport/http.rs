//! The HTTP rule invoker: renders the rule's request fields against the
//! target, joins or anchors the path, issues the request through the host's
//! client pair, and snapshots both the request and the response for the
//! variable map.

use std::time::Instant;

use indexmap::IndexMap;

use poc_core::model::{ProtoRequest, ProtoResponse, Rule, UrlParts};
use poc_core::render::render;
use poc_core::varmap::VariableMap;

use crate::host::HostContext;

pub async fn invoke(rule: &Rule, host: &HostContext, vars: &VariableMap) -> anyhow::Result<(ProtoRequest, ProtoResponse)> {
	let req = &rule.request;

	let rendered_headers: IndexMap<String, String> = req.headers.iter().map(|(k, v)| (k.clone(), render(v, vars))).collect();
	let rendered_path = render(req.path.trim(), vars);
	let rendered_body = render(req.body.trim(), vars);
	let method = if req.method.trim().is_empty() { "GET".to_string() } else { req.method.clone() };

	let key = poc_cache::http_key(&method, &rendered_path, &rendered_headers, &rendered_body, req.follow_redirects);
	if req.cache {
		if let Some(hit) = poc_cache::http_get(&key) {
			tracing::debug!(path = %rendered_path, "http cache hit");
			return Ok(((*hit).0.clone(), (*hit).1.clone()));
		}
	}

	let original = &host.original_request;
	let path = join_path(original.url.path(), &rendered_path);
	let path = path.replace(' ', "%20").replace('+', "%20");

	let scheme = original.url.scheme();
	let authority = match original.url.port() {
		Some(port) => format!("{}:{port}", original.url.host_str().unwrap_or_default()),
		None => original.url.host_str().unwrap_or_default().to_string(),
	};
	let url_string = format!("{scheme}://{authority}{path}");
	let url = url::Url::parse(&url_string).map_err(|e| anyhow::anyhow!("building request url '{url_string}': {e}"))?;

	let mut merged_headers = original.headers.clone();
	merged_headers.extend(rendered_headers.iter().map(|(k, v)| (k.clone(), v.clone())));

	let method_parsed: reqwest::Method = method.parse().map_err(|e| anyhow::anyhow!("method '{method}': {e}"))?;
	let mut builder = host.http.select(req.follow_redirects).request(method_parsed, url.clone());
	for (k, v) in &merged_headers {
		builder = builder.header(k.as_str(), v.as_str());
	}
	if !rendered_body.is_empty() {
		builder = builder.body(rendered_body.clone());
	}

	let proto_request = ProtoRequest {
		url: url_parts(&url),
		method: method.clone(),
		headers: merged_headers,
		raw_header: raw_header(&rendered_headers),
		body: rendered_body.clone().into_bytes(),
		raw: raw_request(&method, &path, &rendered_headers, &rendered_body),
	};

	let start = Instant::now();
	let response = builder.send().await?;
	let latency_ms = start.elapsed().as_millis() as u64;

	let final_url = response.url().clone();
	let status = response.status().as_u16();
	let response_headers: IndexMap<String, String> = response
		.headers()
		.iter()
		.map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
		.collect();
	let content_type = response_headers.get("content-type").cloned().unwrap_or_default();
	let body = response.bytes().await?.to_vec();

	let proto_response = ProtoResponse {
		url: url_parts(&final_url),
		status,
		raw_header: response_raw_header(&response_headers),
		headers: response_headers,
		content_type,
		raw: response_raw(status, &body),
		body,
		latency_ms,
	};

	poc_cache::http_put(key, proto_request.clone(), proto_response.clone());
	Ok((proto_request, proto_response))
}

/// Rebuilds `protoRequest.url.path` from a rendered rule path (see
/// DESIGN.md for the three-branch resolution this follows):
/// - leading `/`: joined onto the original request's path like `path.Join`.
/// - leading `^`: the remainder (including any leading `/`) used verbatim,
///   anchoring the path rather than appending to it.
/// - neither: the original request's own path is left untouched.
fn join_path(original_path: &str, rendered: &str) -> String {
	if let Some(anchored) = rendered.strip_prefix('^') {
		anchored.to_string()
	} else if rendered.starts_with('/') {
		path_join(original_path, rendered)
	} else {
		original_path.to_string()
	}
}

fn path_join(base: &str, suffix: &str) -> String {
	let mut segments: Vec<&str> = Vec::new();
	for seg in base.split('/').chain(suffix.split('/')) {
		match seg {
			"" | "." => {}
			".." => {
				segments.pop();
			}
			s => segments.push(s),
		}
	}
	let mut joined = String::from("/");
	joined.push_str(&segments.join("/"));
	joined
}

fn url_parts(url: &url::Url) -> UrlParts {
	UrlParts {
		scheme: url.scheme().to_string(),
		host: url.host_str().unwrap_or_default().to_string(),
		port: url.port_or_known_default().unwrap_or(0),
		path: url.path().to_string(),
		query: url.query().unwrap_or_default().to_string(),
		fragment: url.fragment().unwrap_or_default().to_string(),
	}
}

/// `raw_header` is built from the rule's own header overlay only, not the
/// full merged header set (resolved ambiguity: see DESIGN.md).
fn raw_header(rule_headers: &IndexMap<String, String>) -> Vec<u8> {
	rule_headers
		.iter()
		.map(|(k, v)| format!("{k}={v}"))
		.collect::<Vec<_>>()
		.join("\n")
		.into_bytes()
}

fn response_raw_header(headers: &IndexMap<String, String>) -> Vec<u8> {
	headers
		.iter()
		.map(|(k, v)| format!("{k}: {v}"))
		.collect::<Vec<_>>()
		.join("\r\n")
		.into_bytes()
}

fn raw_request(method: &str, path: &str, headers: &IndexMap<String, String>, body: &str) -> Vec<u8> {
	let mut raw = format!("{method} {path} HTTP/1.1\r\n");
	for (k, v) in headers {
		raw.push_str(&format!("{k}: {v}\r\n"));
	}
	raw.push_str("\r\n");
	raw.push_str(body);
	raw.into_bytes()
}

fn response_raw(status: u16, body: &[u8]) -> Vec<u8> {
	let mut raw = format!("HTTP/1.1 {status}\r\n\r\n").into_bytes();
	raw.extend_from_slice(body);
	raw
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn joins_a_slash_prefixed_rule_path_onto_the_original_path() {
		assert_eq!(join_path("/a/b", "/c"), "/a/b/c");
	}

	#[test]
	fn anchors_a_caret_prefixed_rule_path() {
		assert_eq!(join_path("/a/b", "^/admin"), "/admin");
	}

	#[test]
	fn leaves_the_original_path_untouched_for_a_bare_rule_path() {
		assert_eq!(join_path("/original", "admin"), "/original");
	}

	#[test]
	fn path_join_collapses_and_resolves_dot_dot() {
		assert_eq!(path_join("/a/b", "/../c"), "/a/c");
	}

	#[tokio::test]
	async fn issues_a_request_and_snapshots_request_and_response() {
		let server = wiremock::MockServer::start().await;
		wiremock::Mock::given(wiremock::matchers::method("GET"))
			.and(wiremock::matchers::path("/probe"))
			.respond_with(wiremock::ResponseTemplate::new(200).set_body_string("ok"))
			.mount(&server)
			.await;

		let base = url::Url::parse(&server.uri()).unwrap();
		let host = HostContext {
			http: crate::host::HttpClients::new(std::time::Duration::from_secs(5)).unwrap(),
			original_request: crate::host::OriginalRequest {
				method: "GET".to_string(),
				url: base,
				headers: IndexMap::new(),
			},
			target: server.address().to_string(),
			cancellation: crate::host::Cancellation::default(),
			config: poc_core::EngineConfig::default(),
		};

		let mut rule = Rule::default();
		rule.request.path = "/probe".to_string();
		rule.request.method = "GET".to_string();

		let (request, response) = invoke(&rule, &host, &VariableMap::new()).await.unwrap();
		assert_eq!(request.url.path, "/probe");
		assert_eq!(response.status, 200);
		assert_eq!(response.body, b"ok");
	}
}
