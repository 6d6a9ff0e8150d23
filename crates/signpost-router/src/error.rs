/// Error taxonomy for route registration, matching and URL generation
///
/// Registration errors (`TooLateToAddRoute`, `NameAlreadySet`, ...) are
/// programming mistakes in route setup. Resolution errors only happen once a
/// path and verb matched but the bound action could not be realized, so they
/// stay distinct from "no route matched", which is not an error at all.
use thiserror::Error;

/// Result alias used across the router
pub type Result<T, E = RouterError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum RouterError {
    /// A route was registered after the registry compiled its patterns
    #[error("too late to add a new route: the route table is already compiled")]
    TooLateToAddRoute,

    /// A route can only be named once
    #[error("route is already named `{existing}` and cannot be renamed to `{attempted}`")]
    NameAlreadySet { existing: String, attempted: String },

    #[error("no route named `{0}`")]
    NamedRouteNotFound(String),

    #[error("route `{route}` needs a value for `{parameter}`")]
    MissingParameter { route: String, parameter: String },

    #[error("malformed action reference `{0}`, expected `Controller@method`")]
    MalformedActionReference(String),

    #[error("controller `{0}` is not registered")]
    ControllerNotFound(String),

    #[error("controller `{controller}` has no action `{method}`")]
    ActionMethodNotFound { controller: String, method: String },

    #[error("unsupported HTTP method `{0}`")]
    UnsupportedMethod(String),

    #[error("a route needs at least one HTTP method")]
    EmptyMethodSet,

    #[error("route template `{template}` could not be compiled")]
    InvalidPattern {
        template: String,
        #[source]
        source: regex::Error,
    },
}

impl RouterError {
    /// True for mistakes made while declaring routes
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RouterError::TooLateToAddRoute
                | RouterError::NameAlreadySet { .. }
                | RouterError::UnsupportedMethod(_)
                | RouterError::EmptyMethodSet
                | RouterError::InvalidPattern { .. }
        )
    }

    /// True when a matched route's action could not be realized
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            RouterError::MalformedActionReference(_)
                | RouterError::ControllerNotFound(_)
                | RouterError::ActionMethodNotFound { .. }
        )
    }
}
