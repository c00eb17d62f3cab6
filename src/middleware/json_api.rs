//! The bootstrap bundle: everything a JSON API needs wired before the first
//! real route exists.

use std::sync::Arc;

use http::{Method, StatusCode};
use serde_json::{Map, Value};
use tracing::error;

use crate::middleware::Middleware;
use crate::request::{Request, RequestInfo};
use crate::response::Response;
use crate::router::Router;
use crate::view::JsonView;

/// Installs the static JSON API plumbing on a [`Router`]:
///
/// - `GET /return` — echoes the request (method, `name` query parameter,
///   headers, query params) back as an envelope
/// - an error hook that logs `LABEL: message` and renders it as
///   `{"msg": …}` at the error's status
/// - a 404 fallback rendering `{"msg": "Invalid route"}` for unknown paths
///   and unregistered methods
/// - an empty-body guard replacing accidentally body-less responses with a
///   rendered 500 — binary downloads (`application/octet-stream`) are
///   exempt
///
/// All four render through the same [`JsonView`], so wrapper / data-only /
/// JSONP configuration applies to bootstrap responses exactly as it does to
/// yours.
///
/// ```rust,no_run
/// use miru::middleware::JsonApi;
/// use miru::{JsonView, Router};
///
/// let view = JsonView::new().data_wrapper("data").meta_wrapper("meta");
/// let app = JsonApi::new(view).install(Router::new());
/// ```
pub struct JsonApi {
    view: Arc<JsonView>,
}

impl JsonApi {
    pub fn new(view: JsonView) -> Self {
        Self { view: Arc::new(view) }
    }

    /// Register the bundle's routes and hooks on `router`.
    pub fn install(self, router: Router) -> Router {
        let echo_view = Arc::clone(&self.view);
        let not_found_view = Arc::clone(&self.view);
        let error_view = Arc::clone(&self.view);

        router
            .on(Method::GET, "/return", move |req: Request| {
                let view = Arc::clone(&echo_view);
                async move { echo(&view, req) }
            })
            .not_found(move |req: Request| {
                let view = Arc::clone(&not_found_view);
                async move {
                    let mut data = Map::new();
                    data.insert("msg".to_owned(), Value::from("Invalid route"));
                    view.render(&req, StatusCode::NOT_FOUND, data)
                }
            })
            .on_error(move |info, err| {
                let message = format!("{}: {err}", err.label());
                error!(method = %info.method(), path = %info.path(), "{message}");

                let mut data = Map::new();
                data.insert("msg".to_owned(), Value::from(message));
                error_view.render_parts(info.callback(), &[], err.status(), data)
            })
            .middleware(EmptyBodyGuard { view: self.view })
    }
}

/// Mirrors the request back at the caller.
fn echo(view: &JsonView, req: Request) -> Response {
    let mut headers = Map::new();
    for (name, value) in req.headers() {
        headers.insert(name.clone(), Value::from(value.as_str()));
    }
    let mut params = Map::new();
    for (name, value) in req.query_params() {
        params.insert(name.clone(), Value::from(value.as_str()));
    }

    let mut data = Map::new();
    data.insert("method".to_owned(), Value::from(req.method().as_str()));
    data.insert(
        "name".to_owned(),
        req.query("name").map(Value::from).unwrap_or(Value::Null),
    );
    data.insert("headers".to_owned(), Value::Object(headers));
    data.insert("params".to_owned(), Value::Object(params));

    view.render(&req, StatusCode::OK, data)
}

/// A response with no body is almost always a handler bug. Flag it instead
/// of letting the client parse thin air.
struct EmptyBodyGuard {
    view: Arc<JsonView>,
}

impl Middleware for EmptyBodyGuard {
    fn after(&self, info: &RequestInfo, response: Response) -> Response {
        // downloads are allowed to stream whatever they want, including nothing
        if response.header("content-type") == Some("application/octet-stream") {
            return response;
        }
        if !response.body().is_empty() {
            return response;
        }

        let mut data = Map::new();
        data.insert("msg".to_owned(), Value::from("Empty response"));
        self.view
            .render_parts(info.callback(), &[], StatusCode::INTERNAL_SERVER_ERROR, data)
    }
}
