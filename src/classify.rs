use reqwest::StatusCode;

use crate::errors::Error;
use crate::transport::ApiResponse;

/// Outcome class of a single request attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Success,
    AuthExpired,
    NotFound,
    Unavailable,
    ServerError(StatusCode),
    NetworkFailure,
}

/// Classify a completed exchange by status code.
pub fn classify_response(response: &ApiResponse) -> Classification {
    match response.status {
        s if s.is_success() => Classification::Success,
        StatusCode::UNAUTHORIZED => Classification::AuthExpired,
        StatusCode::NOT_FOUND => Classification::NotFound,
        StatusCode::SERVICE_UNAVAILABLE => Classification::Unavailable,
        s => Classification::ServerError(s),
    }
}

/// Classify a full transport outcome; an absent response (connection error,
/// timeout, malformed reply) is a `NetworkFailure`.
pub fn classify(outcome: &Result<ApiResponse, Error>) -> Classification {
    match outcome {
        Ok(response) => classify_response(response),
        Err(_) => Classification::NetworkFailure,
    }
}
