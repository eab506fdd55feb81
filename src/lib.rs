mod classify;
mod client;
mod config;
pub mod errors;
mod pipeline;
mod session;
pub mod telemetry;
mod token;
mod transport;

pub use classify::{Classification, classify, classify_response};
pub use client::GatewayClient;
pub use config::{Config, ConfigLocation};
pub use errors::Error;
pub use pipeline::{RequestDescriptor, RequestExecutor};
pub use session::{LoggingSessionSink, SessionSink};
pub use token::{AccessToken, RefreshCoordinator, TokenStore};
pub use transport::{ApiResponse, Transport};

#[cfg(test)]
mod tests;
