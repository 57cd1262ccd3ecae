//! Cache Key Builder
//!
//! Canonical key construction from a URL and an optional parameter set.
//! Two logically identical requests must collide on the same key regardless
//! of parameter insertion order or incidental empty values.

// == Build Key ==
/// Builds a canonical cache key from `url` and query parameters.
///
/// Parameters with an absent (`None`) or empty-string value are dropped, the
/// rest are sorted lexicographically by name and joined as `k=v` pairs. When
/// no parameters survive filtering, the URL is returned unchanged, so
/// `?lang=` and no `lang` parameter collapse to the same key.
pub fn build_key(url: &str, params: &[(&str, Option<&str>)]) -> String {
    let mut pairs: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(name, value)| match value {
            Some(v) if !v.is_empty() => Some((*name, *v)),
            _ => None,
        })
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));

    if pairs.is_empty() {
        return url.to_string();
    }

    let query = pairs
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{url}?{query}")
}

/// Builds a canonical cache key from a raw query string (`a=1&b=2`).
///
/// Splits on `&`/`=` without decoding; a segment with no `=` is treated as a
/// parameter with an absent value and dropped.
pub fn build_key_from_query(url: &str, query: Option<&str>) -> String {
    let raw = match query {
        Some(q) if !q.is_empty() => q,
        _ => return url.to_string(),
    };
    let pairs: Vec<(&str, Option<&str>)> = raw
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (segment, None),
        })
        .collect();
    build_key(url, &pairs)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_params_returns_url() {
        assert_eq!(build_key("/api/words", &[]), "/api/words");
    }

    #[test]
    fn test_params_sorted_by_name() {
        let key = build_key("/api/words", &[("page", Some("2")), ("lang", Some("pl"))]);
        assert_eq!(key, "/api/words?lang=pl&page=2");
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let a = build_key("/api/words", &[("a", Some("1")), ("b", Some("2"))]);
        let b = build_key("/api/words", &[("b", Some("2")), ("a", Some("1"))]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_and_absent_values_dropped() {
        let with_empty = build_key("/api/words", &[("lang", Some("")), ("page", Some("1"))]);
        let with_none = build_key("/api/words", &[("lang", None), ("page", Some("1"))]);
        let omitted = build_key("/api/words", &[("page", Some("1"))]);
        assert_eq!(with_empty, omitted);
        assert_eq!(with_none, omitted);
    }

    #[test]
    fn test_all_params_empty_returns_url() {
        let key = build_key("/api/words", &[("lang", Some("")), ("q", None)]);
        assert_eq!(key, "/api/words");
    }

    #[test]
    fn test_build_key_from_query() {
        assert_eq!(
            build_key_from_query("/api/words", Some("page=2&lang=pl")),
            "/api/words?lang=pl&page=2"
        );
        assert_eq!(build_key_from_query("/api/words", None), "/api/words");
        assert_eq!(
            build_key_from_query("/api/words", Some("lang=&page=1")),
            "/api/words?page=1"
        );
        // Bare segment without '=' is an absent value.
        assert_eq!(build_key_from_query("/api/words", Some("flag")), "/api/words");
    }
}
