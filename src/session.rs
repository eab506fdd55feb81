use tracing::warn;

/// External collaborator invoked when the session is torn down.
///
/// Implementations clear whatever auth indicators live outside this crate
/// (cached UI state, persisted flags) and send the user back to a login
/// flow. Called at most once per session, never concurrently.
pub trait SessionSink: Send + Sync {
    fn logout(&self);
}

/// Default sink for embedders that handle redirection elsewhere; it only
/// records that the session ended.
pub struct LoggingSessionSink;

impl SessionSink for LoggingSessionSink {
    fn logout(&self) {
        warn!("session ended; user must re-authenticate");
    }
}
