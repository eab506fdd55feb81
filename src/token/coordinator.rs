use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::Error;
use crate::session::SessionSink;
use crate::telemetry::refresh::RefreshTelemetry;
use crate::transport::Transport;

use super::{AccessToken, TokenStore};

/// Success body of the refresh endpoint. The refresh credential itself is
/// cookie-transported and never appears here.
#[derive(Deserialize)]
struct RefreshResponse {
    #[serde(alias = "accessToken")]
    access_token: String,
}

/// Owns the single-flight token refresh and the session teardown path.
///
/// Any number of callers may hit `refresh` concurrently; exactly one of them
/// performs the network call while the rest park on the flight lock and
/// adopt its outcome. A failed refresh is terminal for the session: the
/// store is cleared, the sink is notified once, and every waiter gets the
/// same `SessionExpired`.
pub struct RefreshCoordinator {
    transport: Arc<Transport>,
    store: Arc<TokenStore>,
    sink: Arc<dyn SessionSink>,
    flight: Mutex<()>,
    logged_out: AtomicBool,
}

impl RefreshCoordinator {
    pub fn new(
        transport: Arc<Transport>,
        store: Arc<TokenStore>,
        sink: Arc<dyn SessionSink>,
    ) -> Self {
        Self {
            transport,
            store,
            sink,
            flight: Mutex::new(()),
            logged_out: AtomicBool::new(false),
        }
    }

    pub fn is_logged_out(&self) -> bool {
        self.logged_out.load(Ordering::SeqCst)
    }

    /// Re-arm after a new login. A fresh session starts with a fresh flight
    /// state; nothing carries over from a torn-down one.
    pub fn reset(&self) {
        self.logged_out.store(false, Ordering::SeqCst);
    }

    /// Tear the session down. Idempotent: the sink fires exactly once even
    /// when an explicit logout races a failing refresh.
    pub fn shutdown(&self) {
        if !self.logged_out.swap(true, Ordering::SeqCst) {
            self.store.clear();
            info!("session terminated");
            self.sink.logout();
        }
    }

    /// Obtain a fresh access token, joining an in-flight refresh when one
    /// exists.
    ///
    /// `stale` is the token the caller just saw rejected (`None` when it
    /// sent unauthenticated). If the stored token already differs once the
    /// flight lock is acquired, a refresh completed while the caller was
    /// queued and that outcome is adopted without a second network call.
    pub async fn refresh(&self, stale: Option<&str>) -> Result<AccessToken, Error> {
        if self.is_logged_out() {
            return Err(Error::SessionExpired);
        }

        // Only one refresh attempt may run at a time.
        let _flight = self.flight.lock().await;
        if self.is_logged_out() {
            return Err(Error::SessionExpired);
        }
        if let Some(current) = self.store.get()
            && Some(current.as_str()) != stale
        {
            return Ok(current);
        }

        let telemetry = RefreshTelemetry::new("gateway.refresh");
        telemetry.emit_start(SystemTime::now());
        match self.call_refresh().await {
            Ok(token) => {
                self.store.set(token.clone());
                telemetry.emit_success(SystemTime::now());
                Ok(token)
            }
            Err(err) => {
                telemetry.emit_failure(&err, SystemTime::now());
                self.shutdown();
                Err(Error::SessionExpired)
            }
        }
    }

    /// One network refresh. Non-2xx is `RefreshRejected` and never loops
    /// back into another refresh; a malformed success body is equally fatal.
    async fn call_refresh(&self) -> Result<AccessToken, Error> {
        let response = self.transport.post_refresh().await?;
        if !response.status.is_success() {
            return Err(Error::RefreshRejected(response.status, response.body));
        }
        let parsed: RefreshResponse = response.json()?;
        Ok(AccessToken::new(parsed.access_token))
    }
}
