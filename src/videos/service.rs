use std::sync::Arc;

use serde_json::{json, Value};

use crate::{
    app::errors::PipelineError,
    media::{
        apis::{
            cog::{self, service::CogClient},
            leonardo::{self, service::LeonardoClient},
        },
        service::ArtifactProcessor,
    },
};

use super::{
    dtos::{dynami_payload_dto::DynamiPayloadDto, generate_video_dto::GenerateVideoDto},
    models::video_record::VideoRecord,
    records::RecordStore,
    structs::generate_video_response::GenerateVideoResponse,
};

/// Prompt in, published video out: one request runs every stage in order.
pub struct VideoPipeline {
    pub leonardo: LeonardoClient,
    pub cog: CogClient,
    pub processor: ArtifactProcessor,
    pub records: Arc<dyn RecordStore>,
}

impl VideoPipeline {
    /// Runs one invocation and shapes its output.
    ///
    /// Validation failures become `{"errors": [...]}` and provider answers
    /// missing the expected fields are returned as they came. Any other
    /// failure is an `Err` and fails the invocation.
    pub async fn handle(&self, input: Value) -> Result<Value, PipelineError> {
        match self.generate_video(input).await {
            Ok(response) => Ok(json!(response)),
            Err(PipelineError::Validation(errors)) => {
                tracing::error!("error in input: {:?}", errors);
                Ok(json!({ "errors": errors }))
            }
            Err(PipelineError::UpstreamContract { provider, payload }) => {
                tracing::warn!("{} broke its response contract: {}", provider, payload);
                Ok(payload)
            }
            Err(e) => {
                tracing::error!("video generation failed: {}", e);
                Err(e)
            }
        }
    }

    pub async fn generate_video(
        &self,
        input: Value,
    ) -> Result<GenerateVideoResponse, PipelineError> {
        let dto = GenerateVideoDto::from_input(input)?;
        let params = DynamiPayloadDto::from_payload(&dto.dynami_payload)?;
        tracing::info!("input validated");

        let generation = self.leonardo.await_generation(&dto.leonard_payload).await?;
        let image_url = leonardo::service::extract_image_url(generation)?;

        let input_spec = params.to_input_spec(&image_url);
        let prediction = self.cog.predict(&input_spec).await?;
        let output = cog::service::extract_output(prediction)?;

        let artifacts = self.processor.process_output(&output).await?;

        let record = VideoRecord::new(&artifacts, dto.prompt(), &dto.user_id);
        self.records.create_video_record(&record).await?;

        Ok(GenerateVideoResponse {
            video_url: artifacts.video_url,
            thumbnail: artifacts.thumbnail_url,
            prompt: dto.prompt().to_string(),
            user_id: dto.user_id,
        })
    }
}
