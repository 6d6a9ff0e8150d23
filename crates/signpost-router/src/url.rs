/// Reverse routing: named route + parameters → canonical URI
use crate::{path, Form, Params, Result, RouteTable, RouterError};

impl RouteTable {
    /// Generates the canonical URI of a named route
    ///
    /// Only canonical patterns carry names, so the result always ends with
    /// exactly one trailing slash and starts with the base path. Values that
    /// the template does not reference are ignored.
    pub fn url(&self, name: &str, params: &Params) -> Result<String> {
        let compiled = self
            .patterns
            .iter()
            .find(|compiled| compiled.form == Form::Canonical && compiled.name() == Some(name))
            .ok_or_else(|| RouterError::NamedRouteNotFound(name.to_string()))?;

        let body = compiled
            .pattern
            .generate(params)
            .map_err(|parameter| RouterError::MissingParameter {
                route: name.to_string(),
                parameter: parameter.to_string(),
            })?;

        Ok(path::with_base(&self.base_path, &body, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, Route};
    use pretty_assertions::assert_eq;

    fn named(uri: &str, name: &str) -> Route<&'static str> {
        let mut route = Route::new(["GET"], uri, Action::handler("h")).unwrap();
        route.set_name(name).unwrap();
        route
    }

    #[test]
    fn test_url_static() {
        let table = RouteTable::compile(&[named("/posts/all", "posts")], "/").unwrap();
        assert_eq!(table.url("posts", &Params::new()).unwrap(), "/posts/all/");
    }

    #[test]
    fn test_url_with_base_path() {
        let table = RouteTable::compile(&[named("posts/{id}", "post")], "/blog/").unwrap();
        let url = table.url("post", &Params::new().with("id", 5)).unwrap();
        assert_eq!(url, "/blog/posts/5/");
    }

    #[test]
    fn test_url_root_route() {
        let table = RouteTable::compile(&[named("/", "home")], "/blog/").unwrap();
        assert_eq!(table.url("home", &Params::new()).unwrap(), "/blog/");
    }

    #[test]
    fn test_url_missing_parameter() {
        let table = RouteTable::compile(&[named("posts/{id}", "post")], "/").unwrap();
        let err = table.url("post", &Params::new()).unwrap_err();
        assert!(matches!(
            err,
            RouterError::MissingParameter { ref route, ref parameter }
                if route == "post" && parameter == "id"
        ));
    }

    #[test]
    fn test_url_first_duplicate_name_wins() {
        let routes = [named("first", "dup"), named("second", "dup")];
        let table = RouteTable::compile(&routes, "/").unwrap();
        assert_eq!(table.url("dup", &Params::new()).unwrap(), "/first/");
    }
}
