/// Compiled route table
///
/// Every declared route becomes two compiled patterns, in registration order:
/// the canonical form (trailing slash, carries the route name) and the bare
/// form (no trailing slash, never named). Both share verbs, action and
/// placeholder list, so a path matches the same way with or without its
/// trailing slash.
use std::collections::HashSet;

use regex::Regex;

use crate::{Method, Pattern, Result, Route, RouterError};

/// Which of a route's two compiled forms a pattern is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// Trailing-slash form; the only one addressable by name
    Canonical,
    /// Same URI without the trailing slash
    Bare,
}

/// One matchable entry of the table
#[derive(Debug)]
pub struct CompiledPattern {
    pub(crate) route: usize,
    pub(crate) form: Form,
    pub(crate) name: Option<String>,
    pub(crate) methods: Vec<Method>,
    pub(crate) regex: Regex,
    pub(crate) pattern: Pattern,
}

impl CompiledPattern {
    /// Index of the declaring route in the registry
    pub fn route_index(&self) -> usize {
        self.route
    }

    pub fn form(&self) -> Form {
        self.form
    }

    pub fn is_canonical(&self) -> bool {
        self.form == Form::Canonical
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn allows(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    /// Source of the anchored expression
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// Frozen set of compiled patterns for one base path
#[derive(Debug)]
pub struct RouteTable {
    pub(crate) base_path: String,
    pub(crate) patterns: Vec<CompiledPattern>,
}

impl RouteTable {
    /// Compiles routes, in order, under a normalized base path
    pub(crate) fn compile<H>(routes: &[Route<H>], base_path: &str) -> Result<Self> {
        let mut patterns = Vec::with_capacity(routes.len() * 2);
        let mut names = HashSet::new();

        for (index, route) in routes.iter().enumerate() {
            let pattern = route.pattern();
            let compile = |trailing_slash| {
                pattern
                    .compile(base_path, trailing_slash)
                    .map_err(|source| RouterError::InvalidPattern {
                        template: route.uri().to_string(),
                        source,
                    })
            };
            let canonical = compile(true)?;
            let bare = compile(false)?;

            if let Some(name) = route.name() {
                if !names.insert(name) {
                    tracing::warn!(
                        "Route name '{}' is used more than once; URLs use the first route",
                        name
                    );
                }
            }

            patterns.push(CompiledPattern {
                route: index,
                form: Form::Canonical,
                name: route.name().map(str::to_string),
                methods: route.methods().to_vec(),
                regex: canonical,
                pattern: pattern.clone(),
            });
            patterns.push(CompiledPattern {
                route: index,
                form: Form::Bare,
                name: None,
                methods: route.methods().to_vec(),
                regex: bare,
                pattern,
            });
        }

        tracing::debug!(
            "Compiled {} routes into {} patterns under base path {}",
            routes.len(),
            patterns.len(),
            base_path
        );

        Ok(Self {
            base_path: base_path.to_string(),
            patterns,
        })
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// All compiled patterns in match order
    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
