/// Route entity and template handling
///
/// A [`Route`] is what callers declare: a verb set, a URI template and an
/// action. Compiled, matchable forms live in [`crate::table`].
pub mod method;
pub mod pattern;

pub use method::Method;
pub use pattern::{Pattern, Segment};

use std::fmt;

use crate::{path, Action, Result, RouterError};

/// One declared route
///
/// The verb set and template are fixed at construction. The name is
/// write-once: naming an already named route fails.
pub struct Route<H> {
    methods: Vec<Method>,
    uri: String,
    action: Action<H>,
    name: Option<String>,
}

impl<H> Route<H> {
    /// Creates a route from verbs (any case), a URI template and an action
    ///
    /// # Examples
    ///
    /// ```
    /// use signpost_router::{Action, Method, Route};
    ///
    /// let route = Route::new(["get", "post"], "/posts/{id}/", Action::handler("show")).unwrap();
    /// assert_eq!(route.methods(), &[Method::Get, Method::Post]);
    /// assert_eq!(route.uri(), "/posts/{id}");
    /// ```
    pub fn new<I, S>(methods: I, uri: &str, action: Action<H>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut verbs: Vec<Method> = Vec::new();
        for verb in methods {
            let method: Method = verb.as_ref().parse()?;
            if !verbs.contains(&method) {
                verbs.push(method);
            }
        }

        if verbs.is_empty() {
            return Err(RouterError::EmptyMethodSet);
        }

        Ok(Self {
            methods: verbs,
            uri: path::strip_trailing_slash(uri).to_string(),
            action,
            name: None,
        })
    }

    /// Names this route for URL generation
    ///
    /// Returns the route again so calls can be chained off `map`.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        let name = name.into();
        match &self.name {
            Some(existing) => Err(RouterError::NameAlreadySet {
                existing: existing.clone(),
                attempted: name,
            }),
            None => {
                self.name = Some(name);
                Ok(self)
            }
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Verbs in the order they were supplied, uppercase, without duplicates
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// The template with a single trailing slash removed
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn action(&self) -> &Action<H> {
        &self.action
    }

    pub fn allows(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    /// Parses the template into its literal/placeholder skeleton
    pub fn pattern(&self) -> Pattern {
        Pattern::parse(&self.uri)
    }
}

impl<H> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("methods", &self.methods)
            .field("uri", &self.uri)
            .field("action", &self.action)
            .field("name", &self.name)
            .finish()
    }
}
