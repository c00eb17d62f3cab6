//! Incoming HTTP request type and per-request metadata.

use std::collections::HashMap;
use std::time::Instant;

use http::Method;

use crate::flash::Flash;

/// An incoming HTTP request, assembled by the server before dispatch.
pub struct Request {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    params: HashMap<String, String>,
    flash: Flash,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        query: Vec<(String, String)>,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
        params: HashMap<String, String>,
    ) -> Self {
        Self { method, path, query, headers, body, params, flash: Flash::default() }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// First value of a query parameter, percent-decoded.
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All query parameters in wire order, percent-decoded.
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Flash notices accumulated for this request.
    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    pub fn flash_mut(&mut self) -> &mut Flash {
        &mut self.flash
    }
}

/// Per-request metadata that outlives handler dispatch.
///
/// A handler consumes its [`Request`]; error hooks and post-routing
/// middleware still need the request's identity (and JSONP callback) after
/// that. `RequestInfo` is the cheap copy the server captures up front.
pub struct RequestInfo {
    method: Method,
    path: String,
    callback: Option<String>,
    start: Instant,
}

impl RequestInfo {
    pub(crate) fn new(method: Method, path: String, callback: Option<String>) -> Self {
        Self { method, path, callback, start: Instant::now() }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The `callback` query parameter, when the client asked for JSONP.
    pub fn callback(&self) -> Option<&str> {
        self.callback.as_deref()
    }

    /// Time elapsed since the server accepted the request.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
pub(crate) fn test_request(query: &[(&str, &str)]) -> Request {
    Request::new(
        Method::GET,
        "/test".to_owned(),
        query.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
        Vec::new(),
        Vec::new(),
        HashMap::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(
            Method::GET,
            "/".to_owned(),
            Vec::new(),
            vec![("Content-Type".to_owned(), "application/json".to_owned())],
            Vec::new(),
            HashMap::new(),
        );
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn query_returns_first_match() {
        let req = test_request(&[("name", "a"), ("name", "b"), ("other", "c")]);
        assert_eq!(req.query("name"), Some("a"));
        assert_eq!(req.query("missing"), None);
        assert_eq!(req.query_params().len(), 3);
    }
}
