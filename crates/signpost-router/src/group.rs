/// Prefix-scoped route registration
///
/// A group owns no routes. Everything declared through it is forwarded to the
/// registry with the accumulated prefix, so precedence is simply the order in
/// which routes reach the registry.
use crate::{path, Action, Result, Routable, Route, RouteRegistry};

/// Registration view that prefixes every URI declared through it
///
/// # Examples
///
/// ```
/// use signpost_router::{Params, Routable, RouteRegistry};
///
/// let mut registry: RouteRegistry<&str> = RouteRegistry::new();
/// registry
///     .group("admin", |admin| {
///         admin.group("users", |users| {
///             users.get("{id}", "admin.users.show")?.set_name("admin.user")?;
///             Ok(())
///         })?;
///         Ok(())
///     })
///     .unwrap();
///
/// let url = registry.url("admin.user", &Params::new().with("id", 9)).unwrap();
/// assert_eq!(url, "/admin/users/9/");
/// ```
pub struct RouteGroup<'r, H> {
    registry: &'r mut RouteRegistry<H>,
    prefix: String,
}

impl<'r, H> RouteGroup<'r, H> {
    pub(crate) fn new(registry: &'r mut RouteRegistry<H>, prefix: &str) -> Self {
        Self {
            registry,
            prefix: prefix.trim_matches('/').to_string(),
        }
    }

    /// Accumulated prefix, without surrounding slashes
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl<'r, H> Routable<H> for RouteGroup<'r, H>
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
        let uri = path::join_prefix(&self.prefix, uri);
        self.registry.map(methods, &uri, action)
    }

    fn group<F>(&mut self, prefix: &str, builder: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut RouteGroup<'_, H>) -> Result<()>,
    {
        let prefix = path::join_prefix(&self.prefix, prefix);
        builder(&mut RouteGroup::new(&mut *self.registry, &prefix))?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_prefix_is_trimmed() {
        let mut registry: RouteRegistry<&str> = RouteRegistry::new();
        let group = RouteGroup::new(&mut registry, "/prefix/");
        assert_eq!(group.prefix(), "prefix");
    }

    #[test]
    fn test_nested_prefixes_concatenate() {
        let mut registry: RouteRegistry<&str> = RouteRegistry::new();
        registry
            .group("/a/", |a| {
                a.group("b/", |b| {
                    assert_eq!(b.prefix(), "a/b");
                    b.get("/c", "h")?;
                    Ok(())
                })?;
                Ok(())
            })
            .unwrap();

        assert_eq!(registry.routes()[0].uri(), "a/b/c");
    }
}
