//! Wildcard-aware pattern matching for rule fields.

/// The pattern that matches any value.
pub const WILDCARD: &str = "*";

/// Returns true if `pattern` matches anything: `"*"` or the empty string.
pub fn is_wildcard(pattern: &str) -> bool {
    pattern.is_empty() || pattern == WILDCARD
}

/// Checks whether a single value matches a pattern.
///
/// A wildcard pattern matches every value, otherwise the comparison is exact
/// and case-sensitive. There is no prefix or glob support: `"/foo/*"` only
/// matches the literal string `"/foo/*"`.
pub fn matches_value(pattern: &str, value: &str) -> bool {
    is_wildcard(pattern) || pattern == value
}

/// Checks whether a pattern matches at least one entry of `values`.
///
/// A wildcard pattern matches even an empty list.
pub fn matches_any<S: AsRef<str>>(pattern: &str, values: &[S]) -> bool {
    is_wildcard(pattern) || values.iter().any(|v| v.as_ref() == pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_forms() {
        assert!(is_wildcard("*"));
        assert!(is_wildcard(""));
        assert!(!is_wildcard("**"));
        assert!(!is_wildcard(" "));
    }

    #[test]
    fn value_exact() {
        assert!(matches_value("pods", "pods"));
        assert!(!matches_value("pods", "Pods"));
        assert!(!matches_value("pods", ""));
    }

    #[test]
    fn value_wildcard() {
        assert!(matches_value("*", "anything"));
        assert!(matches_value("", "anything"));
        assert!(matches_value("*", ""));
    }

    #[test]
    fn value_no_prefix_semantics() {
        assert!(!matches_value("/foo/*", "/foo/bar"));
        assert!(matches_value("/foo/*", "/foo/*"));
    }

    #[test]
    fn any_membership() {
        let roles = ["viewer", "admin"];
        assert!(matches_any("admin", &roles));
        assert!(!matches_any("owner", &roles));
        assert!(!matches_any("admin", &[] as &[&str]));
        assert!(matches_any("*", &[] as &[&str]));
        assert!(matches_any("", &roles));
    }
}
