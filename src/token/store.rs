use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Opaque bearer credential. The raw value never appears in Debug output;
/// it is read back only at the moment an Authorization header is built.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(len={})", self.0.len())
    }
}

/// In-memory holder of the session's current access token.
///
/// `None` means unauthenticated. Writes come from the refresh coordinator
/// (on a successful refresh) and the session lifecycle (login/teardown);
/// the request executor only reads.
#[derive(Default)]
pub struct TokenStore {
    current: RwLock<Option<AccessToken>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest committed token, if any. Non-blocking.
    pub fn get(&self) -> Option<AccessToken> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set(&self, token: AccessToken) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(token);
    }

    pub fn clear(&self) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}
