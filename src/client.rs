use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::errors::Error;
use crate::pipeline::{RequestDescriptor, RequestExecutor};
use crate::session::{LoggingSessionSink, SessionSink};
use crate::token::{AccessToken, RefreshCoordinator, TokenStore};
use crate::transport::{ApiResponse, Transport};

/// Front door of the authenticated request pipeline.
///
/// Owns the wiring: one transport, one token store, one refresh coordinator,
/// one executor. Business wrappers (inventory, diary, chat, ...) are built
/// on top of `execute` and the verb helpers; they never see the token or the
/// refresh machinery.
#[derive(Clone)]
pub struct GatewayClient {
    store: Arc<TokenStore>,
    refresh: Arc<RefreshCoordinator>,
    executor: Arc<RequestExecutor>,
}

impl GatewayClient {
    /// Build a client that only logs on session teardown.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_sink(config, Arc::new(LoggingSessionSink))
    }

    pub fn with_sink(config: Config, sink: Arc<dyn SessionSink>) -> Result<Self, Error> {
        let transport = Arc::new(Transport::new(&config)?);
        let store = Arc::new(TokenStore::new());
        let refresh = Arc::new(RefreshCoordinator::new(
            Arc::clone(&transport),
            Arc::clone(&store),
            sink,
        ));
        let executor = Arc::new(RequestExecutor::new(
            transport,
            Arc::clone(&store),
            Arc::clone(&refresh),
        ));
        Ok(Self {
            store,
            refresh,
            executor,
        })
    }

    /// Install an externally-issued access token and start a fresh session.
    ///
    /// Token issuance (password login, OAuth callback) happens outside this
    /// crate; whatever flow produced the token hands it over here.
    pub fn begin_session(&self, token: impl Into<String>) {
        self.store.set(AccessToken::new(token));
        self.refresh.reset();
        info!("session started");
    }

    /// Explicit logout. Shares the exactly-once teardown with the refresh
    /// failure path.
    pub fn logout(&self) {
        self.refresh.shutdown();
    }

    pub fn is_authenticated(&self) -> bool {
        !self.refresh.is_logged_out() && self.store.get().is_some()
    }

    pub fn is_logged_out(&self) -> bool {
        self.refresh.is_logged_out()
    }

    pub async fn execute(&self, request: RequestDescriptor) -> Result<ApiResponse, Error> {
        self.executor.execute(request).await
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, Error> {
        self.execute(RequestDescriptor::get(path)).await
    }

    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, Error> {
        self.execute(RequestDescriptor::post(path).with_json(body)?)
            .await
    }

    pub async fn put_json<T: Serialize>(&self, path: &str, body: &T) -> Result<ApiResponse, Error> {
        self.execute(RequestDescriptor::put(path).with_json(body)?)
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, Error> {
        self.execute(RequestDescriptor::delete(path)).await
    }
}
