use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::classify::{Classification, classify_response};
use crate::errors::Error;
use crate::token::{RefreshCoordinator, TokenStore};
use crate::transport::{ApiResponse, Transport};

use super::RequestDescriptor;

/// Entry point for every authenticated business call.
///
/// Attaches the current token, sends, classifies, and on a 401 delegates to
/// the refresh coordinator before replaying the request exactly once. All
/// other classes are surfaced to the caller untouched; this layer performs
/// no backoff of its own.
pub struct RequestExecutor {
    transport: Arc<Transport>,
    store: Arc<TokenStore>,
    refresh: Arc<RefreshCoordinator>,
}

impl RequestExecutor {
    pub fn new(
        transport: Arc<Transport>,
        store: Arc<TokenStore>,
        refresh: Arc<RefreshCoordinator>,
    ) -> Self {
        Self {
            transport,
            store,
            refresh,
        }
    }

    pub async fn execute(&self, mut request: RequestDescriptor) -> Result<ApiResponse, Error> {
        // A dead session short-circuits before any network traffic.
        if self.refresh.is_logged_out() {
            return Err(Error::SessionExpired);
        }

        loop {
            // Read at header-attach time; never reuse a token captured
            // before a replay boundary.
            let token = self.store.get();
            let response = match self.transport.send(&request, token.as_ref()).await {
                Ok(response) => response,
                Err(err) => {
                    warn!(
                        method = %request.method(),
                        path = %request.path(),
                        error = %err,
                        "request failed before a response arrived"
                    );
                    return Err(err);
                }
            };

            match classify_response(&response) {
                Classification::Success => return Ok(response),
                Classification::AuthExpired => {
                    if request.retried() {
                        warn!(
                            path = %request.path(),
                            "401 on a replayed request; surfacing without another refresh"
                        );
                        return Err(Error::AuthExpired);
                    }
                    let stale = token.as_ref().map(|t| t.as_str());
                    self.refresh.refresh(stale).await?;
                    request.mark_retried();
                    debug!(path = %request.path(), "token refreshed; replaying once");
                }
                Classification::NotFound => {
                    return Err(Error::NotFound(request.path().to_string()));
                }
                Classification::Unavailable => {
                    return Err(Error::Unavailable(response.body));
                }
                Classification::ServerError(status) => {
                    error!(
                        method = %request.method(),
                        path = %request.path(),
                        status = status.as_u16(),
                        "request rejected by server"
                    );
                    return Err(Error::Server(status, response.body));
                }
                // A completed exchange always has a status; the no-response
                // class was returned above as the transport error.
                Classification::NetworkFailure => {
                    return Err(Error::Server(response.status, response.body));
                }
            }
        }
    }
}
