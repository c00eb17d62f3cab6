//! Per-request log line.

use tracing::info;

use crate::middleware::Middleware;
use crate::request::RequestInfo;
use crate::response::Response;

/// Logs one `info!` line per request: method, path, response status, and
/// elapsed milliseconds. Register it last so the status it reports is the
/// one that actually went out.
pub struct Trace;

impl Middleware for Trace {
    fn after(&self, info: &RequestInfo, response: Response) -> Response {
        info!(
            method = %info.method(),
            path = %info.path(),
            status = response.status_code().as_u16(),
            latency_ms = info.elapsed().as_millis() as u64,
            "request"
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn trace_passes_the_response_through() {
        let info = RequestInfo::new(Method::GET, "/x".to_owned(), None);
        let resp = Trace.after(&info, Response::text("hello"));
        assert_eq!(resp.body(), b"hello");
    }
}
