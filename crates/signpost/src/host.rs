// File: src/host.rs
// Purpose: Integration with a host application that renders pages itself

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use signpost_router::{path, Routable, Route};
use tracing::debug;
use url::Url;

use crate::dispatch::{not_found, server_error};
use crate::{handler, Dispatcher, Handler, Registry};

/// Template the host rendered a virtual page with
pub const PAGE_TEMPLATE_HEADER: HeaderName = HeaderName::from_static("x-page-template");

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>?").expect("tag expression is valid"));
static NON_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug expression is valid"));

/// Infers the base path from the public site URL
///
/// Only the URL's path is kept: `https://example.com` gives `/`,
/// `https://example.com/blog` gives `/blog/`.
pub fn base_path_from_site_url(site_url: &str) -> Result<String> {
    let url = Url::parse(site_url.trim())
        .with_context(|| format!("Invalid site URL: {}", site_url))?;

    Ok(path::normalize_base_path(url.path()).into_owned())
}

/// Lets the host application declare routes once routing is set up
pub trait HostHook: Send + Sync {
    /// Called after the base path is set, before any request is matched
    fn configured(&self, registry: &mut Registry) -> signpost_router::Result<()>;
}

impl<F> HostHook for F
where
    F: Fn(&mut Registry) -> signpost_router::Result<()> + Send + Sync,
{
    fn configured(&self, registry: &mut Registry) -> signpost_router::Result<()> {
        self(registry)
    }
}

/// Sets the base path from `site_url` and hands the registry to `hook`
///
/// The host then passes each request to [`Dispatcher::process_request`],
/// rendering the page itself whenever that returns `None`.
pub async fn init(dispatcher: &Dispatcher, site_url: &str, hook: &dyn HostHook) -> Result<()> {
    let base_path = base_path_from_site_url(site_url)?;
    dispatcher.set_base_path(&base_path).await;
    debug!("Routing under {} for {}", base_path, site_url);

    dispatcher
        .configure(|registry| hook.configured(registry))
        .await
        .context("Failed to configure routes")?;

    Ok(())
}

/// A page the host should render in place of its own 404
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRender {
    /// Request path that matched
    pub path: String,
    pub uri: String,
    pub title: String,
    pub template: String,
    pub slug: String,
    pub custom_template: Option<PathBuf>,
}

/// Renders queued by matched virtual pages, drained by the host
#[derive(Debug, Clone, Default)]
pub struct RenderQueue {
    pending: Arc<Mutex<Vec<PageRender>>>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, render: PageRender) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(render);
    }

    /// Takes the oldest render queued for a request path
    pub fn take(&self, path: &str) -> Option<PageRender> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let index = pending.iter().position(|render| render.path == path)?;
        Some(pending.remove(index))
    }

    /// Takes every queued render, oldest first
    pub fn drain(&self) -> Vec<PageRender> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A page with no content of its own, rendered by the host from a template
///
/// Mounted for `GET` and `POST`. A match queues a [`PageRender`] and answers
/// `404`, so [`Dispatcher::process_request`] leaves the response to the host.
#[derive(Debug, Clone)]
pub struct VirtualPage {
    uri: String,
    title: String,
    template: String,
    custom_template: Option<PathBuf>,
}

impl VirtualPage {
    pub fn new(template: impl Into<String>, title: &str) -> Self {
        Self {
            uri: String::new(),
            title: sanitize_title(title),
            template: template.into(),
            custom_template: None,
        }
    }

    /// Template file used instead of the host's page template, when it exists
    pub fn with_custom_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom_template = Some(path.into());
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// The custom template if it is a file, otherwise `default`
    pub fn template_path(&self, default: &Path) -> PathBuf {
        choose_template(self.custom_template.as_deref(), default)
    }

    /// URL slug derived from the template name
    pub fn slug(&self) -> String {
        NON_SLUG
            .replace_all(&self.template.to_lowercase(), "-")
            .trim_matches('-')
            .to_string()
    }

    /// Declares this page at `uri` for `GET` and `POST`
    pub fn mount<'a, R>(
        mut self,
        routes: &'a mut R,
        uri: &str,
        queue: &RenderQueue,
    ) -> signpost_router::Result<&'a mut Route<Handler>>
    where
        R: Routable<Handler>,
    {
        self.uri = uri.to_string();

        let page = Arc::new(self);
        let queue = queue.clone();
        routes.map(
            ["GET", "POST"],
            uri,
            handler(move |_, request: Request| page.on_route(request.uri().path(), &queue)),
        )
    }

    fn on_route(&self, path: &str, queue: &RenderQueue) -> Response {
        queue.push(PageRender {
            path: path.to_string(),
            uri: self.uri.clone(),
            title: self.title.clone(),
            template: self.template.clone(),
            slug: self.slug(),
            custom_template: self.custom_template.clone(),
        });

        StatusCode::NOT_FOUND.into_response()
    }
}

impl PageRender {
    /// The custom template if it is a file, otherwise `default`
    pub fn template_path(&self, default: &Path) -> PathBuf {
        choose_template(self.custom_template.as_deref(), default)
    }

    /// Renders the page as `200 OK` with its title as the body
    ///
    /// The chosen template travels in the `x-page-template` header.
    pub fn render(&self, default_template: &Path) -> Response {
        let template = self.template_path(default_template);
        let mut response = (StatusCode::OK, self.title.clone()).into_response();

        if let Ok(value) = HeaderValue::from_str(&template.to_string_lossy()) {
            response.headers_mut().insert(PAGE_TEMPLATE_HEADER, value);
        }

        response
    }
}

/// Host request pipeline: declared routes first, then queued virtual pages
///
/// Each request goes through [`Dispatcher::process_request`]. When a route
/// declines, the render its virtual page queued for that same path is taken
/// off the queue and rendered, so the queue never outlives the request.
#[derive(Clone)]
pub struct HostRouter {
    dispatcher: Dispatcher,
    queue: RenderQueue,
    page_template: PathBuf,
}

impl HostRouter {
    pub fn new(
        dispatcher: Dispatcher,
        queue: RenderQueue,
        page_template: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dispatcher,
            queue,
            page_template: page_template.into(),
        }
    }

    pub async fn handle(&self, request: Request) -> Response {
        let target = format!("{} {}", request.method(), request.uri());
        let path = request.uri().path().to_string();

        match self.dispatcher.process_request(request).await {
            Ok(Some(response)) => response,
            Ok(None) => match self.queue.take(&path) {
                Some(render) => {
                    debug!("Rendering virtual page {} for {}", render.uri, target);
                    render.render(&self.page_template)
                }
                None => not_found(),
            },
            Err(e) => server_error(&target, &e),
        }
    }

    /// An axum router sending every request through [`HostRouter::handle`]
    pub fn into_router(self) -> Router {
        Router::new().fallback(host_fallback).with_state(self)
    }
}

async fn host_fallback(State(host): State<HostRouter>, request: Request) -> Response {
    host.handle(request).await
}

fn choose_template(custom: Option<&Path>, default: &Path) -> PathBuf {
    match custom {
        Some(custom) if custom.is_file() => custom.to_path_buf(),
        _ => default.to_path_buf(),
    }
}

fn sanitize_title(title: &str) -> String {
    TAG.replace_all(title, "").trim().to_string()
}
