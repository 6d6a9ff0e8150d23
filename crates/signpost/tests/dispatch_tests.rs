//! Integration tests for the axum dispatch adapter
//!
//! Covers:
//! - Passing parameters and the request to handlers
//! - Coercing handler values into plain-text responses
//! - Fallback status codes for unmatched and unresolvable routes
//! - Base path changes through the dispatcher
//! - Virtual pages handing rendering back to the host
//! - The host router rendering queued virtual pages

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use signpost::{
    handler,
    host::{self, HostRouter, RenderQueue, VirtualPage, PAGE_TEMPLATE_HEADER},
    router::{Action, Controllers},
    Dispatcher, Params, Registry, Routable,
};
use tower::ServiceExt;

fn request(method: &str, uri: &str) -> Request {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn blog() -> Registry {
    let mut registry = Registry::new();
    registry
        .get(
            "/posts/{postId}/comments/{commentId}",
            handler(|params, _| {
                format!(
                    "{}/{}",
                    params.get("postId").unwrap_or_default(),
                    params.get("commentId").unwrap_or_default()
                )
            }),
        )
        .unwrap();
    registry
        .post(
            "/posts",
            handler(|_, request: Request| {
                (
                    StatusCode::CREATED,
                    [(header::LOCATION, request.uri().path().to_string())],
                )
                    .into_response()
            }),
        )
        .unwrap();
    registry
}

// ============================================================================
// Dispatch
// ============================================================================

#[tokio::test]
async fn test_handler_receives_params() {
    let dispatcher = Dispatcher::new(blog());

    let response = dispatcher
        .dispatch(request("GET", "/posts/123/comments/abc"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "123/abc");
}

#[tokio::test]
async fn test_text_is_coerced_to_plain_text() {
    let dispatcher = Dispatcher::new(blog());

    let response = dispatcher
        .dispatch(request("GET", "/posts/1/comments/2/"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
}

#[tokio::test]
async fn test_response_passes_through() {
    let dispatcher = Dispatcher::new(blog());

    let response = dispatcher
        .dispatch(request("POST", "/posts?draft=1"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/posts");
}

#[tokio::test]
async fn test_controller_reference_dispatch() {
    let mut controllers = Controllers::new();
    controllers.register("PostController", "index", handler(|_, _| "all posts"));

    let mut registry = Registry::with_resolver(controllers);
    registry
        .get("/posts", Action::reference("PostController@index"))
        .unwrap();
    let dispatcher = Dispatcher::new(registry);

    let response = dispatcher
        .dispatch(request("GET", "/posts"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(body_text(response).await, "all posts");
}

// ============================================================================
// Axum Router
// ============================================================================

#[rstest]
#[case::matched("GET", "/posts/1/comments/2", StatusCode::OK)]
#[case::wrong_method("DELETE", "/posts/1/comments/2", StatusCode::NOT_FOUND)]
#[case::unknown_method("HEAD", "/posts/1/comments/2", StatusCode::NOT_FOUND)]
#[case::unmatched("GET", "/nothing/here", StatusCode::NOT_FOUND)]
#[tokio::test]
async fn test_router_status(#[case] method: &str, #[case] uri: &str, #[case] expected: StatusCode) {
    let app = Dispatcher::new(blog()).into_router();
    let response = app.oneshot(request(method, uri)).await.unwrap();
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_router_resolution_failure_is_server_error() {
    let mut registry = Registry::new();
    registry
        .get("/broken", Action::reference("MissingController@index"))
        .unwrap();

    let app = Dispatcher::new(registry).into_router();
    let response = app.oneshot(request("GET", "/broken")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// Base Path
// ============================================================================

#[tokio::test]
async fn test_base_path_change_through_dispatcher() {
    let mut registry = blog();
    registry
        .get("/about", handler(|_, _| "about"))
        .unwrap()
        .set_name("about")
        .unwrap();
    let dispatcher = Dispatcher::new(registry);

    assert_eq!(dispatcher.url("about", &Params::new()).await.unwrap(), "/about/");

    dispatcher.set_base_path("site").await;
    assert_eq!(dispatcher.base_path().await, "/site/");
    assert_eq!(dispatcher.url("about", &Params::new()).await.unwrap(), "/site/about/");
    assert!(dispatcher
        .dispatch(request("GET", "/about"))
        .await
        .unwrap()
        .is_none());
    assert!(dispatcher
        .dispatch(request("GET", "/site/about"))
        .await
        .unwrap()
        .is_some());
}

// ============================================================================
// Host Integration
// ============================================================================

#[tokio::test]
async fn test_init_infers_base_path_and_configures() {
    let dispatcher = Dispatcher::new(Registry::new());
    let hook = |registry: &mut Registry| -> signpost::router::Result<()> {
        registry.get("/hello", handler(|_, _| "hello"))?;
        Ok(())
    };

    host::init(&dispatcher, "https://example.com/blog", &hook)
        .await
        .unwrap();

    assert_eq!(dispatcher.base_path().await, "/blog/");
    let response = dispatcher
        .process_request(request("GET", "/blog/hello/"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(body_text(response).await, "hello");
}

#[tokio::test]
async fn test_virtual_page_defers_to_host() {
    let queue = RenderQueue::new();
    let mut registry = Registry::new();
    VirtualPage::new("landing", "<em>Welcome</em>")
        .mount(&mut registry, "/welcome", &queue)
        .unwrap();
    let dispatcher = Dispatcher::new(registry);

    let processed = dispatcher
        .process_request(request("POST", "/welcome"))
        .await
        .unwrap();
    assert!(processed.is_none());

    let renders = queue.drain();
    assert_eq!(renders.len(), 1);
    assert_eq!(renders[0].uri, "/welcome");
    assert_eq!(renders[0].title, "Welcome");
    assert_eq!(renders[0].slug, "landing");
}

#[tokio::test]
async fn test_virtual_page_not_queued_without_match() {
    let queue = RenderQueue::new();
    let mut registry = Registry::new();
    VirtualPage::new("landing", "Welcome")
        .mount(&mut registry, "/welcome", &queue)
        .unwrap();
    let dispatcher = Dispatcher::new(registry);

    assert!(dispatcher
        .process_request(request("GET", "/elsewhere"))
        .await
        .unwrap()
        .is_none());
    assert!(queue.is_empty());
}

#[tokio::test]
async fn test_host_router_renders_virtual_page_and_keeps_queue_empty() {
    let queue = RenderQueue::new();
    let mut registry = blog();
    VirtualPage::new("about", "<h1>About</h1>")
        .mount(&mut registry, "/about", &queue)
        .unwrap();
    let app = HostRouter::new(Dispatcher::new(registry), queue.clone(), "page.html").into_router();

    for _ in 0..3 {
        let response = app.clone().oneshot(request("GET", "/about")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(PAGE_TEMPLATE_HEADER).unwrap(),
            "page.html"
        );
        assert_eq!(body_text(response).await, "About");
        assert!(queue.is_empty());
    }
}

#[rstest]
#[case::route("GET", "/posts/1/comments/2", StatusCode::OK)]
#[case::unmatched("GET", "/nothing/here", StatusCode::NOT_FOUND)]
#[tokio::test]
async fn test_host_router_passes_routes_through(
    #[case] method: &str,
    #[case] uri: &str,
    #[case] expected: StatusCode,
) {
    let queue = RenderQueue::new();
    let app = HostRouter::new(Dispatcher::new(blog()), queue.clone(), "page.html").into_router();

    let response = app.oneshot(request(method, uri)).await.unwrap();
    assert_eq!(response.status(), expected);
    assert!(queue.is_empty());
}
