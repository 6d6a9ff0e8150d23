/// Route registry and its open/locked lifecycle
///
/// Routes accumulate while the registry is [`Lifecycle::Open`]. The first
/// call that needs compiled patterns (`match_route`, `lookup`, `url`,
/// `compile`) builds the [`RouteTable`] and locks the registry; after that,
/// declaring a route fails with [`RouterError::TooLateToAddRoute`]. Changing
/// the base path drops the table and reopens the registry, keeping every
/// declared route.
use std::fmt;

use once_cell::sync::OnceCell;

use crate::{
    path, Action, ActionResolver, Controllers, Method, Params, Result, Routable, Route,
    RouteGroup, RouteMatch, RouteTable, RouterError,
};

/// State of the registry within the current compilation epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Routes can still be added
    Open,
    /// Patterns are compiled and frozen until the base path changes
    Locked,
}

/// Owns declared routes, the base path and the action resolver
///
/// Matching and URL generation take `&self`: the compiled table sits in a
/// [`OnceCell`], so a locked registry can be shared between threads as is.
/// Only registration and [`RouteRegistry::set_base_path`] need `&mut self`.
///
/// # Examples
///
/// ```
/// use signpost_router::{Params, Routable, RouteRegistry};
///
/// let mut registry: RouteRegistry<&str> = RouteRegistry::new();
/// registry.get("/posts/{postId}/comments/{commentId}", "comments.show").unwrap();
///
/// let route_match = registry
///     .match_route("GET", "/posts/123/comments/abc")
///     .unwrap()
///     .unwrap();
/// assert_eq!(route_match.handler, "comments.show");
/// assert_eq!(route_match.params.get("postId"), Some("123"));
/// assert_eq!(route_match.params.get("commentId"), Some("abc"));
/// ```
pub struct RouteRegistry<H> {
    routes: Vec<Route<H>>,
    base_path: String,
    resolver: Box<dyn ActionResolver<H>>,
    table: OnceCell<RouteTable>,
}

impl<H> RouteRegistry<H>
where
    H: Clone + Send + Sync + 'static,
{
    /// Creates an open registry with base path `/` and an empty [`Controllers`] resolver
    pub fn new() -> Self {
        Self::with_resolver(Controllers::new())
    }

    /// Creates an open registry resolving `Controller@method` references through `resolver`
    pub fn with_resolver(resolver: impl ActionResolver<H> + 'static) -> Self {
        Self {
            routes: Vec::new(),
            base_path: "/".to_string(),
            resolver: Box::new(resolver),
            table: OnceCell::new(),
        }
    }

    /// Replaces the action resolver
    ///
    /// References are resolved per match, so this takes effect immediately
    /// even on a locked registry.
    pub fn set_resolver(&mut self, resolver: impl ActionResolver<H> + 'static) -> &mut Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.table.get() {
            Some(_) => Lifecycle::Locked,
            None => Lifecycle::Open,
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Sets the base path every route is compiled under
    ///
    /// Normalized to one leading and one trailing slash. Reopens the
    /// registry so patterns are recompiled on next use.
    pub fn set_base_path(&mut self, base_path: &str) -> &mut Self {
        self.base_path = path::normalize_base_path(base_path).into_owned();

        if self.table.take().is_some() {
            tracing::debug!("Base path changed to {}, route table reopened", self.base_path);
        }

        self
    }

    /// Whether any declared route carries `name` (does not lock)
    pub fn has(&self, name: &str) -> bool {
        self.routes.iter().any(|route| route.name() == Some(name))
    }

    /// Declared routes in registration order
    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Compiles the route table if needed and locks the registry
    pub fn compile(&self) -> Result<&RouteTable> {
        self.table
            .get_or_try_init(|| RouteTable::compile(&self.routes, &self.base_path))
    }

    /// Finds the declared route and parameters for a request, without
    /// resolving its action
    ///
    /// Unknown verbs never match.
    pub fn lookup(&self, method: &str, path: &str) -> Result<Option<(&Route<H>, Params)>> {
        let table = self.compile()?;

        let Ok(method) = method.parse::<Method>() else {
            tracing::trace!("No route for unsupported method {}", method);
            return Ok(None);
        };

        Ok(table
            .find(method, path)
            .map(|(compiled, params)| (&self.routes[compiled.route], params)))
    }

    /// Matches a request and resolves the matched route's action
    ///
    /// `Ok(None)` means no route matched. Errors only come from resolving a
    /// `Controller@method` reference on a route that did match.
    pub fn match_route(&self, method: &str, path: &str) -> Result<Option<RouteMatch<H>>> {
        let Some((route, params)) = self.lookup(method, path)? else {
            tracing::trace!("No route matched {} {}", method, path);
            return Ok(None);
        };

        let handler = route.action().resolve(self.resolver.as_ref())?;
        tracing::trace!("Matched {} {} to route {}", method, path, route.uri());

        Ok(Some(RouteMatch {
            handler,
            params,
            name: route.name().map(str::to_string),
            uri: route.uri().to_string(),
        }))
    }

    /// Generates the canonical URI of a named route
    pub fn url(&self, name: &str, params: &Params) -> Result<String> {
        self.compile()?.url(name, params)
    }

    /// [`RouteRegistry::url`] taking `(name, value)` pairs
    ///
    /// ```
    /// use signpost_router::{Routable, RouteRegistry};
    ///
    /// let mut registry: RouteRegistry<&str> = RouteRegistry::new();
    /// registry.get("/posts/{year}/{slug}", "posts.show").unwrap().set_name("post.show").unwrap();
    ///
    /// let url = registry
    ///     .url_for_params("post.show", &[("year", "2024"), ("slug", "hello-world")])
    ///     .unwrap();
    /// assert_eq!(url, "/posts/2024/hello-world/");
    /// ```
    pub fn url_for_params(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
        let params: Params = params.iter().copied().collect();
        self.url(name, &params)
    }
}

impl<H> Routable<H> for RouteRegistry<H>
where
    H: Clone + Send + Sync + 'static,
{
    fn map<I, S>(
        &mut self,
        methods: I,
        uri: &str,
        action: impl Into<Action<H>>,
    ) -> Result<&mut Route<H>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.lifecycle() == Lifecycle::Locked {
            return Err(RouterError::TooLateToAddRoute);
        }

        let route = Route::new(methods, uri, action.into())?;
        self.routes.push(route);

        let last = self.routes.len() - 1;
        Ok(&mut self.routes[last])
    }

    fn group<F>(&mut self, prefix: &str, builder: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut RouteGroup<'_, H>) -> Result<()>,
    {
        builder(&mut RouteGroup::new(self, prefix))?;
        Ok(self)
    }
}

impl<H> Default for RouteRegistry<H>
where
    H: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for RouteRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("routes", &self.routes)
            .field("base_path", &self.base_path)
            .field("locked", &self.table.get().is_some())
            .finish()
    }
}
