//! Middleware layer.
//!
//! Middleware runs after routing, sees every response on its way out —
//! whether a handler, the 404 fallback, or the error hook produced it — and
//! may replace it. The right place for cross-cutting concerns: the
//! empty-body guard installed by [`JsonApi`], and the per-request log line
//! of [`Trace`].
//!
//! Register with [`Router::middleware`](crate::Router::middleware);
//! middleware run in registration order.

mod json_api;
mod trace;

pub use json_api::JsonApi;
pub use trace::Trace;

use crate::request::RequestInfo;
use crate::response::Response;

/// A post-routing hook.
pub trait Middleware: Send + Sync + 'static {
    /// Inspect or replace the outgoing response. `info` carries the request
    /// metadata that survives dispatch (method, path, JSONP callback,
    /// timing).
    fn after(&self, info: &RequestInfo, response: Response) -> Response;
}
