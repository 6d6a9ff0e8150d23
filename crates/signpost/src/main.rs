use anyhow::{Context, Result};
use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};
use signpost::{
    handler,
    host::{self, HostRouter, RenderQueue, VirtualPage},
    Config, Dispatcher, Params, Registry, Routable,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load_default().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}, using defaults", e);
        Config::default()
    });

    let queue = RenderQueue::new();
    let dispatcher = Dispatcher::new(Registry::new());

    let site_url = config
        .routing
        .site_url
        .clone()
        .unwrap_or_else(|| format!("http://{}", config.address()));
    let hook = |registry: &mut Registry| declare_routes(registry, &queue);
    host::init(&dispatcher, &site_url, &hook).await?;

    // An explicit base path wins over the one inferred from the site URL
    if config.routing.base_path.is_some() {
        dispatcher
            .set_base_path(&config.routing.resolve_base_path()?)
            .await;
    }

    info!("Routing under {}", dispatcher.base_path().await);
    info!(
        "Post URL example: {}",
        dispatcher
            .url("posts.show", &Params::new().with("id", 42))
            .await?
    );

    // Virtual pages hand their render back to the host pipeline
    let app = HostRouter::new(dispatcher, queue.clone(), "templates/page.html").into_router();

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn declare_routes(registry: &mut Registry, queue: &RenderQueue) -> signpost::router::Result<()> {
    registry
        .get("/", handler(|_, _| "Welcome to signpost"))?
        .set_name("home")?;

    registry.group("posts", |posts| {
        posts
            .get("/", handler(|_, _| "All posts"))?
            .set_name("posts.index")?;
        posts
            .get("{id}", handler(|params, _| {
                format!("Post {}", params.get("id").unwrap_or_default())
            }))?
            .set_name("posts.show")?;
        posts.post("{id}/comments", handler(|params, _| {
            (
                StatusCode::CREATED,
                [(header::LOCATION, format!("/posts/{}/", params.get("id").unwrap_or_default()))],
            )
                .into_response()
        }))?;
        Ok(())
    })?;

    VirtualPage::new("about", "About")
        .mount(registry, "/about", queue)?
        .set_name("about")?;

    Ok(())
}
