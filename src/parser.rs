//! Occurrence-type token parsing.
//!
//! A token is `type` or `type.name`; a compound token holds several of them
//! separated by whitespace (`"click touchstart.tap"`).

/// Base type and reference name of a single type token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedType<'a> {
    /// Empty when the token omits the type (`".name"`).
    pub event_type: &'a str,
    pub name: Option<&'a str>,
}

/// Splits `token` at its first `.`.
///
/// A suffix always wins over `fallback_name`, even an empty one, which leaves
/// the listener unnamed.
pub fn parse_type<'a>(token: &'a str, fallback_name: Option<&'a str>) -> ParsedType<'a> {
    match token.split_once('.') {
        Some((event_type, suffix)) => ParsedType {
            event_type,
            name: non_empty(suffix),
        },
        None => ParsedType {
            event_type: token,
            name: fallback_name.and_then(non_empty),
        },
    }
}

/// Splits a compound token into its type tokens.
///
/// A blank token yields a single empty token so that name-only and
/// target-wide removals still produce one request.
pub fn split_types(token: &str) -> Vec<&str> {
    let types: Vec<&str> = token.split_whitespace().collect();
    if types.is_empty() {
        vec![""]
    } else {
        types
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_type_uses_fallback_name() {
        assert_eq!(
            parse_type("click", Some("foo")),
            ParsedType {
                event_type: "click",
                name: Some("foo")
            }
        );
        assert_eq!(parse_type("click", Some("")).name, None);
        assert_eq!(parse_type("click", None).name, None);
    }

    #[test]
    fn suffix_overrides_fallback() {
        let parsed = parse_type("click.foo", Some("bar"));
        assert_eq!(parsed.event_type, "click");
        assert_eq!(parsed.name, Some("foo"));

        let parsed = parse_type("click.", Some("bar"));
        assert_eq!(parsed.event_type, "click");
        assert_eq!(parsed.name, None);
    }

    #[test]
    fn only_first_dot_separates() {
        let parsed = parse_type("mouseenter.a.b", None);
        assert_eq!(parsed.event_type, "mouseenter");
        assert_eq!(parsed.name, Some("a.b"));
    }

    #[test]
    fn name_only_token_has_empty_type() {
        let parsed = parse_type(".foo", None);
        assert_eq!(parsed.event_type, "");
        assert_eq!(parsed.name, Some("foo"));
    }

    #[test]
    fn split_on_whitespace() {
        assert_eq!(split_types("click focus"), vec!["click", "focus"]);
        assert_eq!(split_types("  keydown   click.bar "), vec!["keydown", "click.bar"]);
        assert_eq!(split_types("blur"), vec!["blur"]);
        assert_eq!(split_types(""), vec![""]);
        assert_eq!(split_types("   "), vec![""]);
    }
}
