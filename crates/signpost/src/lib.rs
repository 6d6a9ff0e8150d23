// File: src/lib.rs
// Purpose: Serve a signpost route registry over axum

pub mod config;
pub mod dispatch;
pub mod host;
pub mod reply;

pub use signpost_router as router;

pub use config::Config;
pub use dispatch::{fallback, handler, Dispatcher, Handler, Registry};
pub use host::{
    base_path_from_site_url, HostHook, HostRouter, PageRender, RenderQueue, VirtualPage,
};
pub use reply::Reply;
pub use signpost_router::{Params, Routable, RouterError};
