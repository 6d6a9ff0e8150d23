/// Request matching over a compiled route table
///
/// First registered wins: patterns are scanned in table order and the first
/// one whose verbs include the method and whose expression accepts the path
/// is the match. Not matching anything is an ordinary `None`.
use crate::{path, CompiledPattern, Method, Params, RouteTable};

/// Result of a successful match, with the action already resolved
#[derive(Debug, Clone)]
pub struct RouteMatch<H> {
    /// Resolved handler of the matched route
    pub handler: H,
    /// Placeholder values in template order
    pub params: Params,
    /// Name of the matched route, whichever form matched
    pub name: Option<String>,
    /// Template of the matched route
    pub uri: String,
}

impl RouteTable {
    /// Finds the first pattern accepting `method` and `path`
    ///
    /// Any query string on `path` is ignored.
    pub fn find(&self, method: Method, path: &str) -> Option<(&CompiledPattern, Params)> {
        let path = path::strip_query(path);

        self.patterns
            .iter()
            .filter(|compiled| compiled.allows(method))
            .find_map(|compiled| {
                compiled
                    .pattern
                    .extract(&compiled.regex, path)
                    .map(|params| (compiled, params))
            })
    }
}
