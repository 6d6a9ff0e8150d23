/// Route actions and their resolution
///
/// An action is either a handler value supplied directly, or a
/// `Controller@method` reference looked up when a request actually matches.
/// Lookup goes through an [`ActionResolver`], which the registry owns and
/// callers can replace.
use std::collections::HashMap;
use std::fmt;

use crate::{Result, RouterError};

/// What a route runs when it matches
#[derive(Clone)]
pub enum Action<H> {
    /// Directly invocable handler
    Handler(H),
    /// Deferred `Controller@method` reference
    Reference(ActionRef),
}

impl<H> Action<H> {
    pub fn handler(handler: H) -> Self {
        Action::Handler(handler)
    }

    /// Deferred reference; the syntax is only checked at match time
    pub fn reference(reference: impl Into<String>) -> Self {
        Action::Reference(ActionRef::new(reference))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Action::Reference(_))
    }

    /// Turns this action into a handler
    pub fn resolve(&self, resolver: &dyn ActionResolver<H>) -> Result<H>
    where
        H: Clone,
    {
        match self {
            Action::Handler(handler) => Ok(handler.clone()),
            Action::Reference(reference) => {
                let (controller, method) = reference.parse()?;
                resolver.resolve(controller, method)
            }
        }
    }
}

impl<H> From<H> for Action<H> {
    fn from(handler: H) -> Self {
        Action::Handler(handler)
    }
}

impl<H> fmt::Debug for Action<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Handler(_) => f.write_str("Handler(..)"),
            Action::Reference(reference) => f.debug_tuple("Reference").field(reference).finish(),
        }
    }
}

/// Unparsed `Controller@method` text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRef {
    raw: String,
}

impl ActionRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Splits into `(controller, method)`
    ///
    /// ```
    /// use signpost_router::ActionRef;
    ///
    /// let reference = ActionRef::new("PostsController@index");
    /// assert_eq!(reference.parse().unwrap(), ("PostsController", "index"));
    ///
    /// assert!(ActionRef::new("PostsController:index").parse().is_err());
    /// ```
    pub fn parse(&self) -> Result<(&str, &str)> {
        let malformed = || RouterError::MalformedActionReference(self.raw.clone());

        let (controller, method) = self.raw.split_once('@').ok_or_else(malformed)?;
        let (controller, method) = (controller.trim(), method.trim());

        if controller.is_empty() || method.is_empty() || method.contains('@') {
            return Err(malformed());
        }

        Ok((controller, method))
    }
}

impl fmt::Display for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Turns a controller name and method name into a handler
pub trait ActionResolver<H>: Send + Sync {
    fn resolve(&self, controller: &str, method: &str) -> Result<H>;
}

impl<H, F> ActionResolver<H> for F
where
    F: Fn(&str, &str) -> Result<H> + Send + Sync,
{
    fn resolve(&self, controller: &str, method: &str) -> Result<H> {
        self(controller, method)
    }
}

/// Default resolver: controllers registered by name, each with named actions
///
/// # Examples
///
/// ```
/// use signpost_router::{ActionResolver, Controllers};
///
/// let mut controllers = Controllers::new();
/// controllers.register("PostsController", "index", "posts.index");
///
/// assert_eq!(controllers.resolve("PostsController", "index").unwrap(), "posts.index");
/// assert!(controllers.resolve("PostsController", "show").is_err());
/// ```
pub struct Controllers<H> {
    controllers: HashMap<String, HashMap<String, H>>,
}

impl<H> Controllers<H> {
    pub fn new() -> Self {
        Self {
            controllers: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        controller: impl Into<String>,
        method: impl Into<String>,
        handler: H,
    ) -> &mut Self {
        self.controllers
            .entry(controller.into())
            .or_insert_with(HashMap::new)
            .insert(method.into(), handler);
        self
    }

    pub fn has_controller(&self, controller: &str) -> bool {
        self.controllers.contains_key(controller)
    }

    pub fn has_action(&self, controller: &str, method: &str) -> bool {
        self.controllers
            .get(controller)
            .map(|methods| methods.contains_key(method))
            .unwrap_or(false)
    }
}

impl<H> Default for Controllers<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ActionResolver<H> for Controllers<H>
where
    H: Clone + Send + Sync,
{
    fn resolve(&self, controller: &str, method: &str) -> Result<H> {
        let methods = self
            .controllers
            .get(controller)
            .ok_or_else(|| RouterError::ControllerNotFound(controller.to_string()))?;

        methods
            .get(method)
            .cloned()
            .ok_or_else(|| RouterError::ActionMethodNotFound {
                controller: controller.to_string(),
                method: method.to_string(),
            })
    }
}
