//! Built-in Kubernetes probe handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! Bodies are JSON so probes speak the same dialect as the rest of the API
//! (and so the empty-body guard has nothing to object to):
//!
//! ```rust,no_run
//! use miru::{Method, Router, health};
//!
//! let app = Router::new()
//!     .on(Method::GET, "/healthz", health::liveness)
//!     .on(Method::GET, "/readyz", health::readiness);
//! ```
//!
//! Replace `readiness` with your own handler if the pod must gate on
//! dependency availability before taking traffic.

use crate::{Request, Response};

/// Liveness probe handler. Always `200 OK` — if the process can respond to
/// HTTP at all, it is alive.
pub async fn liveness(_req: Request) -> Response {
    Response::json(br#"{"msg":"ok"}"#.to_vec())
}

/// Readiness probe handler (default implementation). Always `200 OK`.
pub async fn readiness(_req: Request) -> Response {
    Response::json(br#"{"msg":"ready"}"#.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::test_request;
    use http::StatusCode;

    #[tokio::test]
    async fn probes_answer_json() {
        let resp = liveness(test_request(&[])).await;
        assert_eq!(resp.status_code(), StatusCode::OK);
        assert_eq!(resp.header("content-type"), Some("application/json"));

        let resp = readiness(test_request(&[])).await;
        assert_eq!(resp.body(), br#"{"msg":"ready"}"#);
    }
}
