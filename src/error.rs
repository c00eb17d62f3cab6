//! Unified error type.

use std::fmt;

use http::StatusCode;

/// The error type returned by miru's fallible operations.
///
/// Infrastructure failures (binding a port, accepting a connection) and
/// handler failures meet here so the bootstrap error hook can log and render
/// them uniformly. Handlers return `Err(Error::handler(status, msg))` — or
/// `?` on io / serde_json results — and the hook turns that into a JSON
/// envelope.
#[derive(Debug)]
pub enum Error {
    /// Socket-level failure: binding, accepting, or driving a connection.
    Io(std::io::Error),
    /// A payload that could not be serialized to JSON inside a handler.
    Encode(serde_json::Error),
    /// An application failure carrying the HTTP status to respond with.
    Handler {
        status: StatusCode,
        message: String,
    },
}

impl Error {
    /// An application failure. The bootstrap error hook renders `message`
    /// into the envelope at `status`.
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Handler { status, message: message.into() }
    }

    /// Readable uppercase label, used as the log and envelope message prefix.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO_ERROR",
            Self::Encode(_) => "ENCODE_ERROR",
            Self::Handler { status, .. } if status.is_client_error() => "CLIENT_ERROR",
            Self::Handler { .. } => "SERVER_ERROR",
        }
    }

    /// Status to respond with. Anything that is not a 4xx/5xx clamps to 500.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Handler { status, .. } if status.is_client_error() || status.is_server_error() => {
                *status
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Encode(e) => write!(f, "encode: {e}"),
            Self::Handler { message, .. } => f.write_str(message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Handler { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_errors_keep_their_status() {
        let e = Error::handler(StatusCode::NOT_FOUND, "missing");
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
        assert_eq!(e.label(), "CLIENT_ERROR");
        assert_eq!(e.to_string(), "missing");
    }

    #[test]
    fn non_error_statuses_clamp_to_500() {
        let e = Error::handler(StatusCode::OK, "weird");
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.label(), "SERVER_ERROR");
    }

    #[test]
    fn io_errors_are_server_side() {
        let e = Error::from(std::io::Error::other("boom"));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.label(), "IO_ERROR");
    }
}
