use std::{convert::Infallible, time::Duration};

use reqwest::StatusCode;
use serde_json::Value;
use tokio::time::sleep;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};

use crate::app::{
    errors::PipelineError,
    util::poll::{poll_until, PollError},
};

use super::{
    enums::cog_health_status::CogHealthStatus, models::input_spec::InputSpec,
    structs::cog_health_response::CogHealthResponse,
};

pub static PROVIDER: &str = "cog";

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(120);
const PREDICTION_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_RETRIES: usize = 10;
const RETRY_STATUSES: [StatusCode; 3] = [
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Client for the inference server running next to the worker.
///
/// The wrapped `reqwest::Client` keeps one connection pool for the whole
/// process.
#[derive(Debug, Clone)]
pub struct CogClient {
    pub http_client: reqwest::Client,
    pub api_url: String,
}

#[derive(Debug)]
enum PredictionAttemptError {
    Unavailable(StatusCode),
    Unreachable(reqwest::Error),
    Failed(PipelineError),
}

impl PredictionAttemptError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Unreachable(_))
    }
}

impl CogClient {
    pub fn new(http_client: reqwest::Client, api_url: &str) -> CogClient {
        CogClient {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn get_health(&self) -> Result<CogHealthResponse, reqwest::Error> {
        self.http_client
            .get(format!("{}/health-check", self.api_url))
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await?
            .json::<CogHealthResponse>()
            .await
    }

    /// Blocks until the health check reports READY, then waits `settle`.
    ///
    /// Connection errors and unreadable answers count as "not ready yet".
    pub async fn await_ready(
        &self,
        interval: Duration,
        max_wait: Duration,
        settle: Duration,
    ) -> Result<(), PipelineError> {
        let client = self;

        let result: Result<(), PollError<Infallible>> =
            poll_until(interval, max_wait, move || async move {
                match client.get_health().await {
                    Ok(health) if health.status == CogHealthStatus::READY => Ok(Some(())),
                    Ok(health) => {
                        tracing::debug!("inference server is {}", health.status);
                        Ok(None)
                    }
                    Err(e) => {
                        tracing::debug!("inference server not ready yet: {}", e);
                        Ok(None)
                    }
                }
            })
            .await;

        match result {
            Ok(()) => {
                sleep(settle).await;
                Ok(())
            }
            Err(PollError::TimedOut(_)) => {
                Err(PipelineError::TimedOut("inference server startup", max_wait))
            }
            Err(PollError::Check(never)) => match never {},
        }
    }

    /// Runs a prediction, retrying while the server answers 502/503/504 or
    /// cannot be reached. Returns the raw prediction body.
    pub async fn predict(&self, input_spec: &InputSpec) -> Result<Value, PipelineError> {
        // 100ms, 200ms, 400ms ...
        let retry_strategy = ExponentialBackoff::from_millis(2)
            .factor(50)
            .max_delay(Duration::from_secs(120))
            .take(MAX_RETRIES);

        tracing::info!("running inference");
        let result = RetryIf::start(
            retry_strategy,
            move || self.post_prediction(input_spec),
            |e: &PredictionAttemptError| e.is_retryable(),
        )
        .await;

        match result {
            Ok(prediction) => {
                tracing::info!("inference finished");
                Ok(prediction)
            }
            Err(PredictionAttemptError::Unavailable(status)) => {
                tracing::error!("inference server still answering {} after retries", status);
                Err(PipelineError::InferenceUnavailable(status))
            }
            Err(PredictionAttemptError::Unreachable(e)) => Err(PipelineError::http(PROVIDER)(e)),
            Err(PredictionAttemptError::Failed(e)) => Err(e),
        }
    }

    async fn post_prediction(&self, input_spec: &InputSpec) -> Result<Value, PredictionAttemptError> {
        let result = self
            .http_client
            .post(format!("{}/predictions", self.api_url))
            .timeout(PREDICTION_TIMEOUT)
            .json(input_spec)
            .send()
            .await;

        let res = match result {
            Ok(res) => res,
            Err(e) if e.is_connect() => {
                tracing::warn!("post_prediction (1): {:?}", e);
                return Err(PredictionAttemptError::Unreachable(e));
            }
            Err(e) => {
                tracing::warn!("post_prediction (2): {:?}", e);
                return Err(PredictionAttemptError::Failed(PipelineError::http(PROVIDER)(e)));
            }
        };

        let status = res.status();
        if RETRY_STATUSES.contains(&status) {
            tracing::warn!("post_prediction (3): inference server answered {}", status);
            return Err(PredictionAttemptError::Unavailable(status));
        }

        match res.text().await {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(prediction) => Ok(prediction),
                Err(_) => {
                    tracing::warn!("post_prediction (4): {:?}", text);
                    Err(PredictionAttemptError::Failed(
                        PipelineError::UnexpectedResponse {
                            provider: PROVIDER,
                            body: text,
                        },
                    ))
                }
            },
            Err(e) => {
                tracing::warn!("post_prediction (5): {:?}", e);
                Err(PredictionAttemptError::Failed(PipelineError::http(PROVIDER)(e)))
            }
        }
    }
}

/// Reads the encoded video out of a prediction body.
pub fn extract_output(prediction: Value) -> Result<String, PipelineError> {
    match prediction.get("output").and_then(Value::as_str) {
        Some(output) => Ok(output.to_string()),
        None => Err(PipelineError::UpstreamContract {
            provider: PROVIDER,
            payload: prediction,
        }),
    }
}
