// File: src/dispatch.rs
// Purpose: Match incoming requests against the registry and run their handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use signpost_router::{Params, Result, RouteRegistry, RouterError};
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::Reply;

/// A route handler: receives the extracted parameters and the request
pub type Handler = Arc<dyn Fn(Params, Request) -> Reply + Send + Sync>;

/// Registry of [`Handler`]s
pub type Registry = RouteRegistry<Handler>;

/// Wraps a closure as a [`Handler`], coercing its return value into a [`Reply`]
///
/// ```
/// use signpost::{handler, Registry};
/// use signpost::router::Routable;
///
/// let mut registry = Registry::new();
/// registry
///     .get("/posts/{id}", handler(|params, _request| {
///         format!("post {}", params.get("id").unwrap_or_default())
///     }))
///     .unwrap();
/// ```
pub fn handler<F, R>(f: F) -> Handler
where
    F: Fn(Params, Request) -> R + Send + Sync + 'static,
    R: Into<Reply>,
{
    Arc::new(move |params, request| f(params, request).into())
}

/// Shared, cloneable front of a [`Registry`]
///
/// Matches take the read lock; [`Dispatcher::set_base_path`] and
/// [`Dispatcher::configure`] take the write lock. Handlers run after the
/// lock is released.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<RwLock<Registry>>,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }

    /// Runs `f` against the registry with exclusive access
    pub async fn configure<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Registry) -> Result<()>,
    {
        let mut registry = self.registry.write().await;
        f(&mut registry)
    }

    pub async fn set_base_path(&self, base_path: &str) {
        self.registry.write().await.set_base_path(base_path);
    }

    pub async fn base_path(&self) -> String {
        self.registry.read().await.base_path().to_string()
    }

    /// Canonical URI of a named route
    pub async fn url(&self, name: &str, params: &Params) -> Result<String> {
        self.registry.read().await.url(name, params)
    }

    /// Matches `request` and runs the handler
    ///
    /// `Ok(None)` when no route matches. Errors come from resolving a
    /// `Controller@method` reference on the matched route.
    pub async fn dispatch(&self, request: Request) -> Result<Option<Response>> {
        let route_match = {
            let registry = self.registry.read().await;
            registry.match_route(request.method().as_str(), request.uri().path())?
        };

        let Some(route_match) = route_match else {
            debug!("No route for {} {}", request.method(), request.uri());
            return Ok(None);
        };

        debug!("{} {} -> {}", request.method(), request.uri(), route_match.uri);
        let reply = (route_match.handler)(route_match.params, request);
        Ok(Some(reply.into_response()))
    }

    /// Like [`Dispatcher::dispatch`], but a handler's `404` also yields `None`
    ///
    /// Lets a handler decline a request so the host renders it instead.
    pub async fn process_request(&self, request: Request) -> Result<Option<Response>> {
        Ok(self
            .dispatch(request)
            .await?
            .filter(|response| response.status() != StatusCode::NOT_FOUND))
    }

    /// An axum router sending every request through this dispatcher
    pub fn into_router(self) -> Router {
        Router::new().fallback(fallback).with_state(self)
    }
}

/// Axum fallback: unmatched requests get `404`, resolution failures `500`
pub async fn fallback(State(dispatcher): State<Dispatcher>, request: Request) -> Response {
    let target = format!("{} {}", request.method(), request.uri());

    match dispatcher.dispatch(request).await {
        Ok(Some(response)) => response,
        Ok(None) => not_found(),
        Err(e) => server_error(&target, &e),
    }
}

pub(crate) fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

pub(crate) fn server_error(target: &str, e: &RouterError) -> Response {
    error!("Failed to dispatch {}: {}", target, e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}
