//! Minimal miru example — an enveloped JSON API with the bootstrap bundle.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl 'http://localhost:3000/return?name=alice'
//!   curl 'http://localhost:3000/return?name=alice&callback=render'
//!   curl http://localhost:3000/users/42
//!   curl http://localhost:3000/users/0
//!   curl http://localhost:3000/no-such-route
//!   curl http://localhost:3000/healthz

use miru::middleware::{JsonApi, Trace};
use miru::{Error, JsonView, Method, Request, Response, Router, Server, StatusCode, health};
use serde_json::{Map, Value};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // One view shared by the bundle and the handlers: every response on the
    // wire gets the same {"data":…,"meta":{"error":…,"status":…}} shape.
    let view = JsonView::new().data_wrapper("data").meta_wrapper("meta");

    let user_view = view.clone();
    let app = JsonApi::new(view)
        .install(Router::new())
        .on(Method::GET, "/users/{id}", move |req: Request| {
            let view = user_view.clone();
            async move { get_user(view, req) }
        })
        .on(Method::GET, "/healthz", health::liveness)
        .on(Method::GET, "/readyz", health::readiness)
        .middleware(Trace);

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// GET /users/{id}
//
// Returning Err routes through the bundle's error hook, which logs the
// label and renders {"msg":"CLIENT_ERROR: no such user"} at 404.
fn get_user(view: JsonView, mut req: Request) -> Result<Response, Error> {
    let id = req.param("id").unwrap_or_default().to_owned();
    if id == "0" {
        return Err(Error::handler(StatusCode::NOT_FOUND, "no such user"));
    }

    req.flash_mut().info("profile loaded");

    let mut data = Map::new();
    data.insert("id".to_owned(), Value::from(id));
    data.insert("name".to_owned(), Value::from("alice"));
    Ok(view.render(&req, StatusCode::OK, data))
}
