use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(String),
    /// Transport-level failure before any response arrived.
    Network(reqwest::Error),
    Timeout(Duration),
    /// 401 on a request that was already replayed once.
    AuthExpired,
    /// The session is dead: refresh failed or the user logged out.
    SessionExpired,
    /// The refresh endpoint itself rejected the call (non-2xx).
    RefreshRejected(StatusCode, String),
    NotFound(String),
    Unavailable(String),
    Server(StatusCode, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::Json(err) => write!(f, "json error: {err}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Network(err) => write!(f, "network failure: {err}"),
            Error::Timeout(limit) => write!(f, "request timed out after {limit:?}"),
            Error::AuthExpired => write!(f, "authorization expired (401 after replay)"),
            Error::SessionExpired => write!(f, "session expired; re-authentication required"),
            Error::RefreshRejected(status, body) => {
                write!(f, "token refresh rejected: status={status} body='{body}'")
            }
            Error::NotFound(path) => write!(f, "not found: {path}"),
            Error::Unavailable(body) => write!(f, "service unavailable: {body}"),
            Error::Server(status, body) => {
                write!(f, "server error: status={status} body='{body}'")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Network(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err)
    }
}
