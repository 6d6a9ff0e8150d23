// File: src/reply.rs
// Purpose: Coercion of handler return values into HTTP responses

use axum::response::{IntoResponse, Response};

/// What a handler hands back to the dispatcher
///
/// A full [`Response`] passes through untouched. Anything else becomes a
/// `200 OK` with a `text/plain; charset=utf-8` body.
#[derive(Debug)]
pub enum Reply {
    Response(Response),
    Text(String),
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Response(response) => response,
            Reply::Text(text) => text.into_response(),
        }
    }
}

impl From<Response> for Reply {
    fn from(response: Response) -> Self {
        Reply::Response(response)
    }
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Reply::Text(text)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}

impl From<()> for Reply {
    fn from(_: ()) -> Self {
        Reply::Text(String::new())
    }
}
