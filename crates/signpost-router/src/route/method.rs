/// HTTP verbs a route can be bound to
use std::fmt;
use std::str::FromStr;

use crate::RouterError;

/// Verb vocabulary accepted by [`crate::Routable::map`]
///
/// Parsing is case-insensitive; the canonical form is uppercase.
///
/// ```
/// use signpost_router::Method;
///
/// assert_eq!("get".parse::<Method>().unwrap(), Method::Get);
/// assert_eq!(Method::Options.to_string(), "OPTIONS");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }
}

impl FromStr for Method {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let verb = s.trim();
        Method::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(verb))
            .ok_or_else(|| RouterError::UnsupportedMethod(verb.to_string()))
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
