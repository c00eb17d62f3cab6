//! The JSON envelope renderer.
//!
//! [`JsonView`] turns a handler's payload map into the standard API
//! envelope: optional `data` / `meta` nesting, `error` and `status`
//! metadata, flash notices, JSONP wrapping, and a configurable content
//! type. One view instance is built at startup and shared — by your
//! handlers and by the [`JsonApi`](crate::middleware::JsonApi) bundle — so
//! every response on the wire has the same shape.

use http::StatusCode;
use serde_json::{Map, Number, Value};

use crate::flash::Message;
use crate::options::JsonOptions;
use crate::request::Request;
use crate::response::Response;

/// Configurable renderer producing the standard JSON envelope.
///
/// ```rust
/// use miru::{JsonOptions, JsonView};
///
/// let view = JsonView::new()
///     .data_wrapper("data")
///     .meta_wrapper("meta")
///     .options(JsonOptions::PRETTY);
/// ```
#[derive(Clone, Debug)]
pub struct JsonView {
    data_wrapper: Option<String>,
    meta_wrapper: Option<String>,
    data_only: bool,
    content_type: String,
    options: JsonOptions,
}

impl JsonView {
    /// A view with no wrappers, metadata enabled, `application/json`, and no
    /// serialization flags.
    pub fn new() -> Self {
        Self {
            data_wrapper: None,
            meta_wrapper: None,
            data_only: false,
            content_type: "application/json".to_owned(),
            options: JsonOptions::empty(),
        }
    }

    /// Nest the handler payload under `key` instead of splicing it into the
    /// envelope root.
    pub fn data_wrapper(mut self, key: impl Into<String>) -> Self {
        self.data_wrapper = Some(key.into());
        self
    }

    /// Nest the injected metadata (`error`, `status`, `flash`) under `key`
    /// instead of the envelope root.
    pub fn meta_wrapper(mut self, key: impl Into<String>) -> Self {
        self.meta_wrapper = Some(key.into());
        self
    }

    /// When set, no metadata is injected and any literal `error` / `status` /
    /// `flash` keys are stripped from the envelope root.
    pub fn data_only(mut self, data_only: bool) -> Self {
        self.data_only = data_only;
        self
    }

    /// Content type sent with every rendered response. Default is
    /// `application/json`; append `;charset=UTF-8` to force the charset.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Serialization flags. See [`JsonOptions`].
    pub fn options(mut self, options: JsonOptions) -> Self {
        self.options = options;
        self
    }

    /// Render `data` into the envelope at `status`.
    ///
    /// The request supplies the two client-driven inputs: flash notices
    /// accumulated on it, and the `callback` query parameter for JSONP.
    pub fn render(&self, req: &Request, status: StatusCode, data: Map<String, Value>) -> Response {
        self.render_parts(req.query("callback"), req.flash().messages(), status, data)
    }

    /// Render without a live request — used by hooks that outlive one.
    pub(crate) fn render_parts(
        &self,
        callback: Option<&str>,
        flash: &[Message],
        status: StatusCode,
        data: Map<String, Value>,
    ) -> Response {
        let mut envelope = match &self.data_wrapper {
            Some(key) => {
                let mut outer = Map::new();
                outer.insert(key.clone(), Value::Object(data));
                outer
            }
            None => data,
        };

        if self.data_only {
            envelope.remove("error");
            envelope.remove("status");
            envelope.remove("flash");
        } else {
            self.meta_insert(&mut envelope, "error", Value::Bool(status.as_u16() >= 400));
            self.meta_insert(&mut envelope, "status", Value::from(status.as_u16()));

            if !flash.is_empty() {
                // A literal `flash` key in the data section yields to the
                // real notices in the metadata section.
                match &self.data_wrapper {
                    Some(key) => {
                        if let Some(Value::Object(section)) = envelope.get_mut(key) {
                            section.remove("flash");
                        }
                    }
                    None => {
                        envelope.remove("flash");
                    }
                }
                if let Ok(list) = serde_json::to_value(flash) {
                    self.meta_insert(&mut envelope, "flash", list);
                }
            }
        }

        let mut value = Value::Object(envelope);
        if self.options.contains(JsonOptions::NUMERIC_CHECK) {
            value = coerce_numbers(value);
        }

        // An encode failure leaves an empty body for the empty-body guard
        // to flag as a 500.
        let mut json = if self.options.contains(JsonOptions::PRETTY) {
            serde_json::to_string_pretty(&value).unwrap_or_default()
        } else {
            serde_json::to_string(&value).unwrap_or_default()
        };

        if self.options.contains(JsonOptions::ESCAPE_NON_ASCII) {
            json = escape_non_ascii(&json);
        }

        let body = match callback {
            Some(cb) => {
                let mut wrapped = String::with_capacity(cb.len() + json.len() + 2);
                wrapped.push_str(cb);
                wrapped.push('(');
                wrapped.push_str(&json);
                wrapped.push(')');
                wrapped.into_bytes()
            }
            None => json.into_bytes(),
        };

        Response {
            body,
            headers: vec![("content-type".to_owned(), self.content_type.clone())],
            status,
        }
    }

    fn meta_insert(&self, envelope: &mut Map<String, Value>, key: &str, value: Value) {
        match &self.meta_wrapper {
            Some(meta_key) => {
                let entry = envelope
                    .entry(meta_key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(meta) = entry {
                    meta.insert(key.to_owned(), value);
                }
            }
            None => {
                envelope.insert(key.to_owned(), value);
            }
        }
    }
}

impl Default for JsonView {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively turn strings that parse as numbers into JSON numbers.
fn coerce_numbers(value: Value) -> Value {
    match value {
        Value::String(s) => {
            if let Ok(n) = s.parse::<i64>() {
                return Value::from(n);
            }
            if let Ok(f) = s.parse::<f64>() {
                if f.is_finite() {
                    if let Some(n) = Number::from_f64(f) {
                        return Value::Number(n);
                    }
                }
            }
            Value::String(s)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(coerce_numbers).collect()),
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k, coerce_numbers(v))).collect())
        }
        other => other,
    }
}

/// Escape every non-ASCII character as `\uXXXX` (UTF-16 units, so astral
/// characters become surrogate pairs). Non-ASCII bytes can only occur inside
/// JSON strings, which keeps a plain character walk safe.
fn escape_non_ascii(json: &str) -> String {
    use std::fmt::Write;

    if json.is_ascii() {
        return json.to_owned();
    }
    let mut out = String::with_capacity(json.len() + 16);
    let mut buf = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut buf).iter() {
                let _ = write!(out, "\\u{unit:04x}");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::test_request;

    fn payload(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect()
    }

    fn parsed(resp: &Response) -> Value {
        serde_json::from_slice(resp.body()).unwrap()
    }

    #[test]
    fn default_view_splices_metadata_into_the_root() {
        let view = JsonView::new();
        let req = test_request(&[]);
        let resp = view.render(&req, StatusCode::OK, payload(&[("id", Value::from(7))]));

        assert_eq!(resp.status_code(), StatusCode::OK);
        assert_eq!(resp.header("content-type"), Some("application/json"));
        let body = parsed(&resp);
        assert_eq!(body["id"], 7);
        assert_eq!(body["error"], false);
        assert_eq!(body["status"], 200);
    }

    #[test]
    fn statuses_at_or_above_400_set_the_error_flag() {
        let view = JsonView::new();
        let req = test_request(&[]);

        let resp = view.render(&req, StatusCode::BAD_REQUEST, Map::new());
        assert_eq!(parsed(&resp)["error"], true);

        let resp = view.render(&req, StatusCode::PERMANENT_REDIRECT, Map::new());
        assert_eq!(parsed(&resp)["error"], false);
    }

    #[test]
    fn wrappers_partition_data_and_metadata() {
        let view = JsonView::new().data_wrapper("data").meta_wrapper("meta");
        let req = test_request(&[]);
        let resp = view.render(&req, StatusCode::OK, payload(&[("id", Value::from(7))]));

        let body = parsed(&resp);
        assert_eq!(body["data"]["id"], 7);
        assert_eq!(body["meta"]["error"], false);
        assert_eq!(body["meta"]["status"], 200);
        assert!(body.get("error").is_none());
        assert!(body.get("id").is_none());
    }

    #[test]
    fn data_only_strips_metadata_keys() {
        let view = JsonView::new().data_only(true);
        let req = test_request(&[]);
        let resp = view.render(
            &req,
            StatusCode::BAD_REQUEST,
            payload(&[
                ("id", Value::from(7)),
                ("error", Value::from("stale")),
                ("status", Value::from("stale")),
                ("flash", Value::from("stale")),
            ]),
        );

        let body = parsed(&resp);
        assert_eq!(body, serde_json::json!({"id": 7}));
        // data-only still reports the real HTTP status on the wire
        assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn flash_messages_surface_in_the_metadata_section() {
        let view = JsonView::new().data_wrapper("data").meta_wrapper("meta");
        let mut req = test_request(&[]);
        req.flash_mut().info("saved");
        req.flash_mut().error("quota low");

        let resp = view.render(
            &req,
            StatusCode::OK,
            payload(&[("flash", Value::from("literal"))]),
        );

        let body = parsed(&resp);
        assert!(body["data"].get("flash").is_none());
        assert_eq!(body["meta"]["flash"][0]["level"], "info");
        assert_eq!(body["meta"]["flash"][0]["text"], "saved");
        assert_eq!(body["meta"]["flash"][1]["level"], "error");
    }

    #[test]
    fn no_flash_key_without_messages() {
        let view = JsonView::new();
        let req = test_request(&[]);
        let resp = view.render(&req, StatusCode::OK, Map::new());
        assert!(parsed(&resp).get("flash").is_none());
    }

    #[test]
    fn callback_query_parameter_wraps_the_body() {
        let view = JsonView::new();
        let req = test_request(&[("callback", "cb")]);
        let resp = view.render(&req, StatusCode::OK, Map::new());

        let body = String::from_utf8(resp.body().to_vec()).unwrap();
        assert!(body.starts_with("cb("));
        assert!(body.ends_with(')'));
        // content type stays whatever the view was configured with
        assert_eq!(resp.header("content-type"), Some("application/json"));
    }

    #[test]
    fn pretty_flag_indents_output() {
        let view = JsonView::new().options(JsonOptions::PRETTY);
        let req = test_request(&[]);
        let resp = view.render(&req, StatusCode::OK, payload(&[("id", Value::from(7))]));
        let body = String::from_utf8(resp.body().to_vec()).unwrap();
        assert!(body.contains('\n'));
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["id"], 7);
    }

    #[test]
    fn escape_flag_converts_non_ascii_to_u_escapes() {
        let view = JsonView::new().options(JsonOptions::ESCAPE_NON_ASCII);
        let req = test_request(&[]);
        let resp = view.render(
            &req,
            StatusCode::OK,
            payload(&[("name", Value::from("Zoë 😀"))]),
        );

        let body = String::from_utf8(resp.body().to_vec()).unwrap();
        assert!(body.is_ascii());
        assert!(body.contains("\\u00eb"));
        // astral character becomes a surrogate pair
        assert!(body.contains("\\ud83d\\ude00"));
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["name"], "Zoë 😀");
    }

    #[test]
    fn numeric_check_coerces_nested_strings() {
        let view = JsonView::new().options(JsonOptions::NUMERIC_CHECK);
        let req = test_request(&[]);
        let resp = view.render(
            &req,
            StatusCode::OK,
            payload(&[
                ("count", Value::from("42")),
                ("ratio", Value::from("2.5")),
                ("tags", serde_json::json!(["7", "seven", ""])),
            ]),
        );

        let body = parsed(&resp);
        assert_eq!(body["count"], 42);
        assert_eq!(body["ratio"], 2.5);
        assert_eq!(body["tags"], serde_json::json!([7, "seven", ""]));
    }

    #[test]
    fn custom_content_type_is_sent() {
        let view = JsonView::new().content_type("application/json;charset=UTF-8");
        let req = test_request(&[]);
        let resp = view.render(&req, StatusCode::OK, Map::new());
        assert_eq!(resp.header("content-type"), Some("application/json;charset=UTF-8"));
    }
}
