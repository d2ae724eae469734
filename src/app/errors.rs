use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;

use super::models::api_error::ApiError;

#[derive(Debug)]
pub enum DefaultApiError {
    Overloaded,
}

impl DefaultApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::Overloaded => ApiError {
                code: StatusCode::SERVICE_UNAVAILABLE,
                message: "The worker is busy, try again later.".to_string(),
            },
        }
    }
}

/// Failure of one stage of a video generation request.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("input failed validation")]
    Validation(Vec<String>),
    /// The provider answered, but without the fields the next stage needs.
    /// The raw body is handed back to the caller untouched.
    #[error("{provider} response is missing expected fields")]
    UpstreamContract {
        provider: &'static str,
        payload: Value,
    },
    #[error("{0} did not finish within {1:?}")]
    TimedOut(&'static str, Duration),
    #[error("{provider} request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} returned an unreadable response: {body}")]
    UnexpectedResponse { provider: &'static str, body: String },
    #[error("inference server kept answering {0}")]
    InferenceUnavailable(StatusCode),
    #[error("could not decode inference output: {0}")]
    Decode(String),
    #[error("thumbnail extraction failed: {0}")]
    Thumbnail(String),
    #[error("storage upload failed: {0}")]
    Storage(String),
    #[error("database write failed: {0}")]
    Database(String),
    #[error("google authentication failed: {0}")]
    Auth(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn http(provider: &'static str) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| Self::Http { provider, source }
    }
}
