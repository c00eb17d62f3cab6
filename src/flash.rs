//! Transient notices surfaced through the JSON envelope.
//!
//! Handlers push messages onto the request's [`Flash`] store; the view moves
//! them into the envelope metadata as a `flash` list. Messages live for the
//! current request/response cycle only — there is no session behind them.

use serde::Serialize;

/// Severity of a flash message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// A single transient notice.
#[derive(Clone, Debug, Serialize)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

/// Per-request store of transient notices.
///
/// ```rust
/// use miru::flash::{Flash, Level};
///
/// let mut flash = Flash::default();
/// flash.info("profile saved");
/// flash.add(Level::Warning, "email unverified");
/// assert_eq!(flash.messages().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Flash {
    messages: Vec<Message>,
}

impl Flash {
    pub fn add(&mut self, level: Level, text: impl Into<String>) {
        self.messages.push(Message { level, text: text.into() });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.add(Level::Info, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.add(Level::Error, text);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
