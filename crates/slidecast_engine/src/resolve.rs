use url::Url;

/// Resolves a possibly-relative artifact path against the configured origin.
///
/// Absolute http(s) URLs pass through unchanged, which also makes the
/// function idempotent. An empty origin leaves relative paths as-is
/// (same-origin, co-deployed build).
pub fn resolve_artifact_url(origin: &str, path: &str) -> String {
    if let Ok(parsed) = Url::parse(path) {
        if matches!(parsed.scheme(), "http" | "https") {
            return path.to_string();
        }
    }
    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}
