use http::header::{self, HeaderMap, HeaderName};
use regex::{Regex, RegexBuilder};

/// Compiled regex matched against header names
///
/// Header maps store names in lowercase, so the pattern is always compiled
/// case-insensitively. The regex is compiled once per rule and shared by
/// every exchange; matching only needs `&self`.
#[derive(Debug, Clone)]
pub struct HeaderPattern(Regex);

impl HeaderPattern {
    /// Compile a header name pattern
    ///
    /// # Errors
    ///
    /// Returns the regex error when the pattern does not compile
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        RegexBuilder::new(pattern).case_insensitive(true).build().map(Self)
    }

    /// Source text of the pattern
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Check a single header name
    #[must_use]
    pub fn is_match(&self, name: &HeaderName) -> bool {
        self.0.is_match(name.as_str())
    }

    /// Names currently present in `headers` that match, in map order
    ///
    /// Returned as an owned snapshot so callers can mutate the map while
    /// walking the result.
    #[must_use]
    pub fn matching_names(&self, headers: &HeaderMap) -> Vec<HeaderName> {
        headers.keys().filter(|name| self.is_match(name)).cloned().collect()
    }

    /// Expand `template` with the capture groups of this pattern against `name`
    ///
    /// Supports `$1`, `${1}` and `${group}` references. Returns `None` when
    /// the name does not match.
    #[must_use]
    pub fn expand(&self, name: &HeaderName, template: &str) -> Option<String> {
        let captures = self.0.captures(name.as_str())?;
        let mut expanded = String::with_capacity(template.len());
        captures.expand(template, &mut expanded);
        Some(expanded)
    }
}

/// Whether `name` is the reserved `Host` pseudo-header
///
/// `Host` is carried by the request target rather than the generic header
/// set, so renames that land on it are routed to the transport host field.
#[must_use]
pub fn is_host_pseudo_header(name: &str) -> bool {
    name.eq_ignore_ascii_case(header::HOST.as_str())
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    fn headers(names: &[&'static str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for name in names {
            map.insert(HeaderName::from_static(name), HeaderValue::from_static("v"));
        }
        map
    }

    #[test]
    fn pattern_ignores_case() {
        let pattern = HeaderPattern::new("X-Test").unwrap();
        assert!(pattern.is_match(&HeaderName::from_static("x-test")));
    }

    #[test]
    fn pattern_is_unanchored() {
        let pattern = HeaderPattern::new("Test").unwrap();
        assert!(pattern.is_match(&HeaderName::from_static("x-testing")));

        let anchored = HeaderPattern::new("^Test$").unwrap();
        assert!(!anchored.is_match(&HeaderName::from_static("x-testing")));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(HeaderPattern::new("(").is_err());
    }

    #[test]
    fn matching_names_returns_every_match() {
        let map = headers(&["x-old-a", "x-old-b", "foo"]);
        let pattern = HeaderPattern::new("^X-Old-").unwrap();

        let mut names: Vec<_> = pattern.matching_names(&map).iter().map(|n| n.as_str().to_owned()).collect();
        names.sort();

        assert_eq!(names, ["x-old-a", "x-old-b"]);
    }

    #[test]
    fn matching_names_empty_when_nothing_matches() {
        let map = headers(&["foo"]);
        let pattern = HeaderPattern::new("not-existing").unwrap();
        assert!(pattern.matching_names(&map).is_empty());
    }

    #[test]
    fn expand_substitutes_capture_groups() {
        let pattern = HeaderPattern::new("^X-Old-(.*)$").unwrap();
        let expanded = pattern.expand(&HeaderName::from_static("x-old-token"), "X-New-$1");
        assert_eq!(expanded.as_deref(), Some("X-New-token"));
    }

    #[test]
    fn expand_supports_named_groups() {
        let pattern = HeaderPattern::new("^X-(?P<vendor>[a-z]+)-Id$").unwrap();
        let expanded = pattern.expand(&HeaderName::from_static("x-acme-id"), "${vendor}-Request-Id");
        assert_eq!(expanded.as_deref(), Some("acme-Request-Id"));
    }

    #[test]
    fn expand_without_references_is_literal() {
        let pattern = HeaderPattern::new("Test").unwrap();
        let expanded = pattern.expand(&HeaderName::from_static("test"), "X-Testing");
        assert_eq!(expanded.as_deref(), Some("X-Testing"));
    }

    #[test]
    fn expand_is_none_without_match() {
        let pattern = HeaderPattern::new("^X-Old").unwrap();
        assert!(pattern.expand(&HeaderName::from_static("foo"), "bar").is_none());
    }

    #[test]
    fn host_pseudo_header_detection() {
        assert!(is_host_pseudo_header("Host"));
        assert!(is_host_pseudo_header("host"));
        assert!(is_host_pseudo_header("HOST"));
        assert!(!is_host_pseudo_header("X-Host"));
        assert!(!is_host_pseudo_header("Hostname"));
    }
}
