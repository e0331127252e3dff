//! URL normalization and relative link resolution

use crate::error::ValidationError;
use url::Url;

/// Normalize user input into an absolute http(s) URL
///
/// Bare domains (with or without a port) get `https://` prepended. Input
/// that already names another scheme (`ftp:`, `mailto:` ...) is rejected, as
/// is anything that does not parse to a URL with a host.
pub fn normalize_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingUrl);
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else if has_foreign_scheme(trimmed) {
        return Err(ValidationError::InvalidUrl(trimmed.to_string()));
    } else {
        format!("https://{}", trimmed)
    };

    let parsed =
        Url::parse(&candidate).map_err(|_| ValidationError::InvalidUrl(trimmed.to_string()))?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::InvalidUrl(trimmed.to_string()));
    }

    Ok(candidate)
}

/// Returns true for `http://` and `https://` prefixes, any case
pub fn has_http_scheme(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// True when `input` parses with a scheme of its own
///
/// `localhost:3000` parses as scheme `localhost`; a run of digits after the
/// colon marks it as host and port instead.
fn has_foreign_scheme(input: &str) -> bool {
    let Ok(parsed) = Url::parse(input) else {
        return false;
    };
    let rest = input.get(parsed.scheme().len() + 1..).unwrap_or("");
    let port = rest.split(['/', '?', '#']).next().unwrap_or("");
    port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit())
}

/// Scheme + host (+ port) of `base_url`, or `None` for opaque origins
pub fn origin_of(base_url: &str) -> Option<String> {
    let parsed = Url::parse(base_url).ok()?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return None;
    }
    Some(origin.ascii_serialization())
}

/// Resolve a link found in a page against the page's origin
///
/// Links that already start with `http` are returned verbatim. Root-relative
/// and bare paths are joined to the origin. Protocol-relative links take the
/// base scheme. Returns an empty string when nothing sensible can be built.
pub fn resolve_url(candidate: &str, base_url: &str) -> String {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return String::new();
    }
    if candidate.starts_with("http") {
        return candidate.to_string();
    }

    if let Some(rest) = candidate.strip_prefix("//") {
        return match Url::parse(base_url) {
            Ok(base) if !rest.is_empty() => format!("{}://{}", base.scheme(), rest),
            _ => String::new(),
        };
    }

    match origin_of(base_url) {
        Some(origin) if candidate.starts_with('/') => format!("{}{}", origin, candidate),
        Some(origin) => format!("{}/{}", origin, candidate),
        None => String::new(),
    }
}
