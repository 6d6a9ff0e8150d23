/// Registration surface shared by the registry and route groups
use crate::{Action, Method, Result, Route, RouteGroup};

/// Anything routes can be declared on
///
/// Implemented by [`crate::RouteRegistry`] and [`RouteGroup`]; the verb
/// shortcuts are `map` with a single verb.
pub trait Routable<H> {
    /// Declares a route for the given verbs (any case)
    fn map<I, S>(
        &mut self,
        methods: I,
        uri: &str,
        action: impl Into<Action<H>>,
    ) -> Result<&mut Route<H>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    /// Runs `builder` against a group scoped to `prefix`
    fn group<F>(&mut self, prefix: &str, builder: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut RouteGroup<'_, H>) -> Result<()>;

    fn get(&mut self, uri: &str, action: impl Into<Action<H>>) -> Result<&mut Route<H>> {
        self.map([Method::Get], uri, action)
    }

    fn post(&mut self, uri: &str, action: impl Into<Action<H>>) -> Result<&mut Route<H>> {
        self.map([Method::Post], uri, action)
    }

    fn put(&mut self, uri: &str, action: impl Into<Action<H>>) -> Result<&mut Route<H>> {
        self.map([Method::Put], uri, action)
    }

    fn patch(&mut self, uri: &str, action: impl Into<Action<H>>) -> Result<&mut Route<H>> {
        self.map([Method::Patch], uri, action)
    }

    fn delete(&mut self, uri: &str, action: impl Into<Action<H>>) -> Result<&mut Route<H>> {
        self.map([Method::Delete], uri, action)
    }

    fn options(&mut self, uri: &str, action: impl Into<Action<H>>) -> Result<&mut Route<H>> {
        self.map([Method::Options], uri, action)
    }
}
