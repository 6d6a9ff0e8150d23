/// Pattern compilation for URI templates
///
/// Pure parsing of templates like `posts/{postId}/comments/{ commentId? }`
/// into typed segments, plus the two directions built on top of them:
/// compiling to an anchored [`Regex`] for matching, and substituting values
/// back into the skeleton for URL generation.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{path, Params};

/// `{name}` or `{name?}`, whitespace inside the braces ignored
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\s*([A-Za-z0-9]+)(\?)?\s*\}").expect("placeholder expression is valid")
});

/// What a placeholder value may contain
const VALUE: &str = "[^/.]+";

/// Represents a piece of a parsed template
///
/// # Examples
///
/// ```
/// use signpost_router::{Pattern, Segment};
///
/// let pattern = Pattern::parse("posts/{page?}");
/// assert_eq!(
///     pattern.segments(),
///     &[
///         Segment::Literal("posts".to_string()),
///         Segment::Param { name: "page".to_string(), optional: true, slash: true },
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text matched exactly, case-sensitive
    Literal(String),
    /// Placeholder; `slash` marks an optional placeholder that owns the
    /// `/` in front of it so the whole piece can be left out
    Param {
        name: String,
        optional: bool,
        slash: bool,
    },
}

/// Literal/placeholder skeleton of one template
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parses a template; leading spaces and slashes are dropped
    pub fn parse(template: &str) -> Self {
        let template = template.trim_start_matches([' ', '/']);
        let mut segments = Vec::new();
        let mut cursor = 0;

        for caps in PLACEHOLDER.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let optional = caps.get(2).is_some();

            let mut literal = &template[cursor..whole.start()];
            let slash = optional && literal.ends_with('/');
            if slash {
                literal = &literal[..literal.len() - 1];
            }
            if !literal.is_empty() {
                segments.push(Segment::Literal(literal.to_string()));
            }

            segments.push(Segment::Param {
                name: name.as_str().to_string(),
                optional,
                slash,
            });
            cursor = whole.end();
        }

        if cursor < template.len() {
            segments.push(Segment::Literal(template[cursor..].to_string()));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names, left to right
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Regex source for the template body, one capture group per placeholder
    fn expression(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => regex::escape(text),
                Segment::Param {
                    optional: false, ..
                } => format!("({})", VALUE),
                Segment::Param {
                    optional: true,
                    slash: true,
                    ..
                } => format!("(?:/({}))?", VALUE),
                Segment::Param {
                    optional: true,
                    slash: false,
                    ..
                } => format!("({})?", VALUE),
            })
            .collect()
    }

    /// Compiles the template under `base_path` into an anchored expression
    ///
    /// `base_path` must be normalized (leading and trailing slash).
    pub fn compile(&self, base_path: &str, trailing_slash: bool) -> Result<Regex, regex::Error> {
        let source = path::with_base(
            &regex::escape(base_path),
            &self.expression(),
            trailing_slash,
        );
        Regex::new(&format!("^{}$", source))
    }

    /// Extracts placeholder values from a successful match
    ///
    /// Optional placeholders that took no part in the match are left out.
    pub fn extract(&self, regex: &Regex, path: &str) -> Option<Params> {
        let caps = regex.captures(path)?;
        let params = self
            .param_names()
            .enumerate()
            .filter_map(|(index, name)| caps.get(index + 1).map(|value| (name, value.as_str())))
            .collect();
        Some(params)
    }

    /// Substitutes values back into the skeleton (generation mode)
    ///
    /// Returns the template body without base path or trailing slash, or the
    /// name of the first required placeholder with no value. An empty string
    /// counts as no value, since the matcher never accepts one.
    ///
    /// ```
    /// use signpost_router::{Params, Pattern};
    ///
    /// let pattern = Pattern::parse("/posts/{id}/comments");
    /// let body = pattern.generate(&Params::new().with("id", 123)).unwrap();
    /// assert_eq!(body, "posts/123/comments");
    ///
    /// assert_eq!(pattern.generate(&Params::new()), Err("id"));
    /// ```
    pub fn generate(&self, params: &Params) -> Result<String, &str> {
        let mut body = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => body.push_str(text),
                Segment::Param {
                    name,
                    optional,
                    slash,
                } => match (params.get(name).filter(|value| !value.is_empty()), optional) {
                    (Some(value), _) => {
                        // Skipped optionals must not leave a doubled slash
                        if *slash && !body.is_empty() && !body.ends_with('/') {
                            body.push('/');
                        }
                        body.push_str(value);
                    }
                    (None, true) => {}
                    (None, false) => return Err(name.as_str()),
                },
            }
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn param(name: &str) -> Segment {
        Segment::Param {
            name: name.to_string(),
            optional: false,
            slash: false,
        }
    }

    #[test]
    fn test_parse_static() {
        let pattern = Pattern::parse("/posts/all");
        assert_eq!(pattern.segments(), &[Segment::Literal("posts/all".to_string())]);
        assert_eq!(pattern.param_names().count(), 0);
    }

    #[test]
    fn test_parse_placeholders_in_order() {
        let pattern = Pattern::parse("posts/{postId}/comments/{commentId}");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("posts/".to_string()),
                param("postId"),
                Segment::Literal("/comments/".to_string()),
                param("commentId"),
            ]
        );
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["postId", "commentId"]);
    }

    #[test]
    fn test_parse_ignores_whitespace_inside_braces() {
        assert_eq!(
            Pattern::parse("posts/{ postId }"),
            Pattern::parse("posts/{postId}")
        );
        assert_eq!(
            Pattern::parse("posts/{ page? }"),
            Pattern::parse("posts/{page?}")
        );
    }

    #[test]
    fn test_parse_leaves_invalid_placeholders_literal() {
        let pattern = Pattern::parse("files/{file-name}");
        assert_eq!(pattern.param_names().count(), 0);
        assert_eq!(
            pattern.segments(),
            &[Segment::Literal("files/{file-name}".to_string())]
        );
    }

    #[test]
    fn test_compile_canonical_and_bare() {
        let pattern = Pattern::parse("posts/{id}");
        let canonical = pattern.compile("/", true).unwrap();
        let bare = pattern.compile("/", false).unwrap();

        assert!(canonical.is_match("/posts/1/"));
        assert!(!canonical.is_match("/posts/1"));
        assert!(bare.is_match("/posts/1"));
        assert!(!bare.is_match("/posts/1/"));
        assert!(!bare.is_match("/posts/"));
    }

    #[test]
    fn test_compile_escapes_literals() {
        let pattern = Pattern::parse("feed.xml");
        let regex = pattern.compile("/", false).unwrap();
        assert!(regex.is_match("/feed.xml"));
        assert!(!regex.is_match("/feedaxml"));
    }

    #[test]
    fn test_compile_with_base_path() {
        let pattern = Pattern::parse("prefix/all");
        let regex = pattern.compile("/base-path/", false).unwrap();
        assert!(regex.is_match("/base-path/prefix/all"));
        assert!(!regex.is_match("/prefix/all"));
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        let regex = Pattern::parse("About").compile("/", false).unwrap();
        assert!(regex.is_match("/About"));
        assert!(!regex.is_match("/about"));
    }

    #[test]
    fn test_optional_placeholder() {
        let pattern = Pattern::parse("posts/{page?}");
        let bare = pattern.compile("/", false).unwrap();

        assert_eq!(pattern.extract(&bare, "/posts"), Some(Params::new()));
        assert_eq!(
            pattern.extract(&bare, "/posts/2"),
            Some(Params::new().with("page", "2"))
        );
    }

    #[test]
    fn test_values_stop_at_slash_and_dot() {
        let pattern = Pattern::parse("posts/{id}");
        let bare = pattern.compile("/", false).unwrap();
        assert!(pattern.extract(&bare, "/posts/1/2").is_none());
        assert!(pattern.extract(&bare, "/posts/1.json").is_none());
    }

    #[test]
    fn test_generate() {
        let pattern = Pattern::parse("posts/{page?}");
        assert_eq!(pattern.generate(&Params::new()), Ok("posts".to_string()));
        assert_eq!(
            pattern.generate(&Params::new().with("page", 3)),
            Ok("posts/3".to_string())
        );
    }

    #[test]
    fn test_generate_rejects_empty_required_value() {
        let pattern = Pattern::parse("posts/{id}");
        assert_eq!(pattern.generate(&Params::new().with("id", "")), Err("id"));
    }

    #[test]
    fn test_generate_treats_empty_optional_as_absent() {
        let pattern = Pattern::parse("posts/{page?}");
        assert_eq!(
            pattern.generate(&Params::new().with("page", "")),
            Ok("posts".to_string())
        );
    }

    #[test]
    fn test_generate_after_skipped_optional_has_single_slash() {
        let pattern = Pattern::parse("{a?}/{b?}");
        assert_eq!(
            pattern.generate(&Params::new().with("b", "x")),
            Ok("x".to_string())
        );

        let pattern = Pattern::parse("posts/{a?}/{b?}");
        assert_eq!(
            pattern.generate(&Params::new().with("b", "x")),
            Ok("posts/x".to_string())
        );
    }

    #[test]
    fn test_generate_ignores_extra_values() {
        let pattern = Pattern::parse("posts/{id}");
        let params = Params::new().with("id", 1).with("unused", "x");
        assert_eq!(pattern.generate(&params), Ok("posts/1".to_string()));
    }
}
