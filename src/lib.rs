//! # miru
//!
//! JSON API envelopes and bootstrap middleware for hyper services behind a
//! reverse proxy. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! nginx handles TLS, rate limiting, slow clients, and body-size limits.
//! miru does not. What miru owns is the part that changes between JSON APIs
//! and is tedious to re-wire every time:
//!
//! - **Response envelopes** — every payload wrapped the same way, with
//!   `error` / `status` metadata, optional `data` / `meta` nesting, flash
//!   notices, and JSONP callbacks ([`JsonView`])
//! - **Bootstrap routes** — an echo endpoint, a JSON error handler, a JSON
//!   404, and a guard that flags accidentally-empty bodies
//!   ([`middleware::JsonApi`])
//! - **The seam they plug into** — radix-tree routing via [`matchit`],
//!   tokio + hyper I/O, graceful shutdown draining in-flight requests
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use miru::middleware::{JsonApi, Trace};
//! use miru::{JsonView, Method, Request, Router, Server, StatusCode};
//! use serde_json::{Map, Value};
//!
//! #[tokio::main]
//! async fn main() {
//!     let view = JsonView::new().data_wrapper("data").meta_wrapper("meta");
//!
//!     let user_view = view.clone();
//!     let app = JsonApi::new(view)
//!         .install(Router::new())
//!         .on(Method::GET, "/users/{id}", move |req: Request| {
//!             let view = user_view.clone();
//!             async move {
//!                 let mut data = Map::new();
//!                 data.insert("id".into(), Value::from(req.param("id").unwrap_or("?")));
//!                 view.render(&req, StatusCode::OK, data)
//!             }
//!         })
//!         .middleware(Trace);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//! ```
//!
//! Every response above comes out shaped the same way:
//!
//! ```json
//! {"data":{"id":"42"},"meta":{"error":false,"status":200}}
//! ```

mod error;
mod handler;
mod options;
mod request;
mod response;
mod router;
mod server;
mod view;

pub mod flash;
pub mod health;
pub mod middleware;

pub use error::Error;
pub use flash::Flash;
pub use handler::Handler;
pub use options::JsonOptions;
pub use request::{Request, RequestInfo};
pub use response::{ContentType, IntoResponse, Response};
pub use router::Router;
pub use server::Server;
pub use view::JsonView;

/// Re-exported from the [`http`] crate: these appear throughout the public API.
pub use http::{Method, StatusCode};
