//! Handler trait and type erasure.
//!
//! The router stores handlers of different concrete types in one map, so
//! each handler is erased behind `Arc<dyn ErasedHandler>`:
//!
//! ```text
//! async fn hello(req: Request) -> Response { … }     ← user writes this
//!        ↓ router.on(Method::GET, "/", hello)
//! Arc::new(FnHandler(hello)) as BoxedHandler         ← blanket Handler impl
//!        ↓ handler.call(req) at request time
//! Box::pin(async { hello(req).await.into_response() })
//! ```
//!
//! Futures resolve to `Result<Response, Error>`: an `Err` routes to the
//! router's error hook instead of reaching the wire. Per-request cost is one
//! Arc clone and one virtual call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Error;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future resolving to a handler outcome.
pub(crate) type BoxFuture =
    Pin<Box<dyn Future<Output = Result<Response, Error>> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A heap-allocated, type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` (or capturing closure) with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// The trait is sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Bridges a concrete handler `F` into the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::test_request;
    use http::StatusCode;

    #[tokio::test]
    async fn plain_response_handlers_erase() {
        async fn h(_req: Request) -> Response {
            Response::text("ok")
        }
        let boxed = h.into_boxed_handler();
        let resp = boxed.call(test_request(&[])).await.unwrap();
        assert_eq!(resp.body(), b"ok");
    }

    #[tokio::test]
    async fn fallible_handlers_surface_errors() {
        async fn h(_req: Request) -> Result<Response, Error> {
            Err(Error::handler(StatusCode::UNPROCESSABLE_ENTITY, "bad input"))
        }
        let boxed = h.into_boxed_handler();
        let err = match boxed.call(test_request(&[])).await {
            Err(e) => e,
            Ok(_) => panic!("expected the handler error to surface"),
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
