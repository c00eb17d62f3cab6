//! Radix-tree request router and its extension points.
//!
//! One tree per HTTP method, O(path-length) lookup. Beyond plain routes the
//! router carries the three hooks the bootstrap bundle plugs into: a
//! fallback handler for unmatched requests, an error hook for handler
//! failures, and a post-routing middleware chain.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;
use tracing::error;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::middleware::Middleware;
use crate::request::RequestInfo;
use crate::response::Response;

type ErrorHook = Box<dyn Fn(&RequestInfo, Error) -> Response + Send + Sync + 'static>;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration method returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    fallback: Option<BoxedHandler>,
    error_hook: Option<ErrorHook>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            fallback: None,
            error_hook: None,
            middleware: Vec::new(),
        }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use miru::{Method, Request, Response, Router};
    /// # async fn get_user(_: Request) -> Response { Response::text("") }
    /// # async fn create_user(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::GET,  "/users/{id}", get_user)
    ///     .on(Method::POST, "/users",      create_user);
    /// ```
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Handler for requests no route matches (unknown paths and unregistered
    /// methods alike).
    pub fn not_found(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    /// Hook invoked when a handler returns an error. Without one, errors are
    /// logged and answered with a bare status.
    pub fn on_error(
        mut self,
        hook: impl Fn(&RequestInfo, Error) -> Response + Send + Sync + 'static,
    ) -> Self {
        self.error_hook = Some(Box::new(hook));
        self
    }

    /// Append a post-routing middleware. Middleware run in registration
    /// order on every response, routed or not.
    pub fn middleware(mut self, middleware: impl Middleware) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    pub(crate) fn fallback(&self) -> Option<BoxedHandler> {
        self.fallback.as_ref().map(Arc::clone)
    }

    pub(crate) fn render_error(&self, info: &RequestInfo, err: Error) -> Response {
        match &self.error_hook {
            Some(hook) => hook(info, err),
            None => {
                error!("{}: {err}", err.label());
                Response::status(err.status())
            }
        }
    }

    /// Run the middleware chain over a response.
    pub(crate) fn finish(&self, info: &RequestInfo, response: Response) -> Response {
        self.middleware
            .iter()
            .fold(response, |resp, mw| mw.after(info, resp))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
