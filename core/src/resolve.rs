//! Joining a client's base URL with a request's URL.

/// Combine `base` with `target`.
///
/// An empty `base`, or a `target` that already starts with `http`, returns
/// `target` untouched. Otherwise one trailing `/` is trimmed from `base` and
/// one leading `/` from `target`, and the two are joined with a single `/`.
/// Only a single slash is ever trimmed per side, so `"//values"` keeps one.
pub fn resolve(base: &str, target: &str) -> String {
    if base.is_empty() || target.starts_with("http") {
        return target.to_string();
    }
    let base = base.strip_suffix('/').unwrap_or(base);
    let target = target.strip_prefix('/').unwrap_or(target);
    format!("{base}/{target}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_base_returns_target() {
        assert_eq!(resolve("", "/api"), "/api");
    }

    #[test]
    fn absolute_target_ignores_base() {
        assert_eq!(
            resolve("http://google.com", "https://localhost/api"),
            "https://localhost/api"
        );
    }

    #[test]
    fn boundary_slashes_collapse_to_one() {
        for (base, target) in [
            ("http://localhost/api", "values"),
            ("http://localhost/api/", "values"),
            ("http://localhost/api", "/values"),
            ("http://localhost/api/", "/values"),
        ] {
            assert_eq!(
                resolve(base, target),
                "http://localhost/api/values",
                "base={base:?} target={target:?}"
            );
        }
    }

    #[test]
    fn only_one_leading_slash_is_trimmed() {
        assert_eq!(resolve("http://h/api", "//values"), "http://h/api//values");
    }

    #[test]
    fn only_one_trailing_slash_is_trimmed() {
        assert_eq!(resolve("http://h/api//", "values"), "http://h/api//values");
    }

    #[test]
    fn empty_target_keeps_base_with_slash() {
        assert_eq!(resolve("http://h/api", ""), "http://h/api/");
    }

    #[test]
    fn absolute_check_is_prefix_only() {
        // No validation: anything starting with "http" wins.
        assert_eq!(resolve("http://h", "httpbin/get"), "httpbin/get");
    }
}
