use std::time::Duration;

use reqwest::{header, Response};
use serde_json::{Map, Value};

use crate::app::{
    errors::PipelineError,
    util::poll::{poll_until, PollError},
};

use super::{
    enums::leonardo_generation_status::LeonardoGenerationStatus,
    structs::{
        leonardo_generation_job_response::LeonardoGenerationJobResponse,
        leonardo_generation_response::LeonardoGenerationResponse,
    },
};

pub static PROVIDER: &str = "leonardo";

#[derive(Debug, Clone)]
pub struct LeonardoClient {
    pub http_client: reqwest::Client,
    pub api_url: String,
    pub api_key: String,
    pub poll_interval: Duration,
    pub max_wait: Duration,
}

impl LeonardoClient {
    pub fn new(
        http_client: reqwest::Client,
        api_url: &str,
        api_key: &str,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> LeonardoClient {
        LeonardoClient {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            poll_interval,
            max_wait,
        }
    }

    /// Submits a generation and waits for it to reach COMPLETE or FAILED.
    ///
    /// Returns the raw generation body of the terminal poll. A submission
    /// answer without a generation id comes back as `UpstreamContract`
    /// carrying the provider's body.
    pub async fn await_generation(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<Value, PipelineError> {
        tracing::info!("requesting image from leonardo");
        let job_value = self.create_generation(payload).await?;

        let generation_id = match serde_json::from_value::<LeonardoGenerationJobResponse>(
            job_value.clone(),
        ) {
            Ok(job) => {
                tracing::info!(
                    "generation {} submitted ({} api credits)",
                    job.sd_generation_job.generation_id,
                    job.sd_generation_job.api_credit_cost.unwrap_or_default()
                );
                job.sd_generation_job.generation_id
            }
            Err(_) => {
                return Err(PipelineError::UpstreamContract {
                    provider: PROVIDER,
                    payload: job_value,
                })
            }
        };

        let client = self;
        let id = &generation_id;

        let result: Result<Value, PollError<PipelineError>> =
            poll_until(self.poll_interval, self.max_wait, move || async move {
                let generation = match client.get_generation_by_id(id).await {
                    Ok(generation) => generation,
                    Err(e) => return Err(e),
                };

                let status = match serde_json::from_value::<LeonardoGenerationResponse>(
                    generation.clone(),
                ) {
                    Ok(response) => response.generations_by_pk.status,
                    Err(_) => {
                        return Err(PipelineError::UpstreamContract {
                            provider: PROVIDER,
                            payload: generation,
                        })
                    }
                };

                tracing::debug!("generation {} is {}", id, status);

                match LeonardoGenerationStatus::is_terminal(&status) {
                    true => Ok(Some(generation)),
                    false => Ok(None),
                }
            })
            .await;

        match result {
            Ok(generation) => {
                tracing::info!("image generation {} finished", generation_id);
                Ok(generation)
            }
            Err(PollError::TimedOut(elapsed)) => {
                tracing::error!(
                    "generation {} not finished after {:?}",
                    generation_id,
                    elapsed
                );
                Err(PipelineError::TimedOut("leonardo generation", self.max_wait))
            }
            Err(PollError::Check(e)) => Err(e),
        }
    }

    pub async fn create_generation(
        &self,
        payload: &Map<String, Value>,
    ) -> Result<Value, PipelineError> {
        let url = format!("{}/generations", self.api_url);
        let result = self
            .http_client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await;

        match result {
            Ok(res) => parse_response(res).await,
            Err(e) => {
                tracing::warn!("create_generation: {:?}", e);
                Err(PipelineError::http(PROVIDER)(e))
            }
        }
    }

    pub async fn get_generation_by_id(&self, id: &str) -> Result<Value, PipelineError> {
        let url = format!("{}/generations/{}", self.api_url, id);
        let result = self
            .http_client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await;

        match result {
            Ok(res) => parse_response(res).await,
            Err(e) => {
                tracing::warn!("get_generation_by_id: {:?}", e);
                Err(PipelineError::http(PROVIDER)(e))
            }
        }
    }
}

/// Reads the url of the first generated image out of a finished generation.
pub fn extract_image_url(generation: Value) -> Result<String, PipelineError> {
    let url = serde_json::from_value::<LeonardoGenerationResponse>(generation.clone())
        .ok()
        .and_then(|response| response.generations_by_pk.generated_images.into_iter().next())
        .map(|image| image.url);

    match url {
        Some(url) => Ok(url),
        None => Err(PipelineError::UpstreamContract {
            provider: PROVIDER,
            payload: generation,
        }),
    }
}

async fn parse_response(res: Response) -> Result<Value, PipelineError> {
    match res.text().await {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(_) => {
                tracing::warn!("leonardo answered with non-json: {:?}", text);
                Err(PipelineError::UnexpectedResponse {
                    provider: PROVIDER,
                    body: text,
                })
            }
        },
        Err(e) => {
            tracing::warn!("leonardo body unreadable: {:?}", e);
            Err(PipelineError::http(PROVIDER)(e))
        }
    }
}
