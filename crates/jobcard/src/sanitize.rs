//! Helpers for sanitizing data before it enters log lines and span attributes.
//!
//! Workflow trigger URLs authenticate with a signature in the query string
//! (`...?api-version=1&sig=...`), so only scheme, host and path may be logged.

/// Drops the query string and fragment from a URL, and any userinfo.
///
/// - `https://flows.example.com/run?sig=abc` → `https://flows.example.com/run?****`
/// - `https://user:pw@host/path` → `https://****@host/path`
/// - `https://host/path` → `https://host/path` (no change)
pub fn redact_flow_url(url: &str) -> String {
    let (base, had_query) = match url.find(['?', '#']) {
        Some(pos) => (&url[..pos], true),
        None => (url, false),
    };

    let base = match base.find("://") {
        Some(scheme_end) => {
            let after_scheme = &base[scheme_end + 3..];
            let authority_end = after_scheme.find('/').unwrap_or(after_scheme.len());
            match after_scheme[..authority_end].rfind('@') {
                Some(at_pos) => format!(
                    "{}****@{}",
                    &base[..scheme_end + 3],
                    &after_scheme[at_pos + 1..]
                ),
                None => base.to_string(),
            }
        }
        None => base.to_string(),
    };

    if had_query {
        format!("{}?****", base)
    } else {
        base
    }
}

/// Shortens a response body for log lines.
pub fn truncate_body(body: &str, max_chars: usize) -> String {
    if body.chars().count() > max_chars {
        let truncated: String = body.chars().take(max_chars).collect();
        format!("{}... (truncated)", truncated)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_flow_url_strips_signature() {
        assert_eq!(
            redact_flow_url("https://prod.example.com/workflows/abc/run?api-version=1&sig=SECRET"),
            "https://prod.example.com/workflows/abc/run?****"
        );
    }

    #[test]
    fn test_redact_flow_url_without_query() {
        assert_eq!(
            redact_flow_url("https://api.example.com/jobs"),
            "https://api.example.com/jobs"
        );
    }

    #[test]
    fn test_redact_flow_url_userinfo() {
        assert_eq!(
            redact_flow_url("https://user:pw@api.example.com/jobs"),
            "https://****@api.example.com/jobs"
        );
    }

    #[test]
    fn test_truncate_body_short_unchanged() {
        assert_eq!(truncate_body("oops", 10), "oops");
    }

    #[test]
    fn test_truncate_body_long() {
        let body = "x".repeat(20);
        assert_eq!(truncate_body(&body, 5), "xxxxx... (truncated)");
    }
}
