//! # Signpost Router
//!
//! Declarative HTTP route registration and matching with:
//! - URI templates with required (`{id}`) and optional (`{page?}`) placeholders
//! - Verb sets per route (`GET`, `POST`, `PUT`, `PATCH`, `DELETE`, `OPTIONS`)
//! - Nested, prefix-scoped route groups
//! - Named routes and reverse URL generation
//! - Handlers given directly or as `Controller@method` references
//!
//! ## Compilation and Locking
//!
//! Routes are declared on an open [`RouteRegistry`]. The first match or URL
//! generation compiles every route into two patterns, with and without a
//! trailing slash, and locks the registry. Declaring routes after that is a
//! [`RouterError::TooLateToAddRoute`]. Setting a new base path reopens it.
//!
//! ## Precedence
//!
//! First registered wins. Groups forward to the registry as they run, so a
//! group's routes sit exactly where the group was declared.
//!
//! ## Example
//!
//! ```
//! use signpost_router::{Params, Routable, RouteRegistry};
//!
//! let mut registry: RouteRegistry<&str> = RouteRegistry::new();
//! registry.set_base_path("blog");
//! registry.get("/posts/all", "posts.index").unwrap().set_name("posts").unwrap();
//! registry.group("admin", |admin| {
//!     admin.post("posts/{id}", "admin.posts.update")?;
//!     Ok(())
//! }).unwrap();
//!
//! let route_match = registry.match_route("POST", "/blog/admin/posts/7/").unwrap().unwrap();
//! assert_eq!(route_match.handler, "admin.posts.update");
//! assert_eq!(route_match.params.get("id"), Some("7"));
//!
//! assert_eq!(registry.url("posts", &Params::new()).unwrap(), "/blog/posts/all/");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod action;
mod error;
mod group;
mod matcher;
mod params;
mod registry;
mod routable;
mod table;
mod url;

pub mod path;
pub mod route;

// ============================================================================
// Public API
// ============================================================================

pub use action::{Action, ActionRef, ActionResolver, Controllers};
pub use error::{Result, RouterError};
pub use group::RouteGroup;
pub use matcher::RouteMatch;
pub use params::Params;
pub use registry::{Lifecycle, RouteRegistry};
pub use routable::Routable;
pub use route::{Method, Pattern, Route, Segment};
pub use table::{CompiledPattern, Form, RouteTable};
