use axum::http::StatusCode;
use uuid::Uuid;

use crate::videos::service::VideoPipeline;

use super::{
    dtos::run_job_dto::RunJobDto, enums::job_status::JobStatus,
    structs::job_response::JobResponse,
};

pub async fn run_job(dto: RunJobDto, pipeline: &VideoPipeline) -> (StatusCode, JobResponse) {
    let id = dto.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    tracing::info!("job {} started", id);

    match pipeline.handle(dto.input).await {
        Ok(output) => {
            tracing::info!("job {} completed", id);
            (
                StatusCode::OK,
                JobResponse {
                    id,
                    status: JobStatus::COMPLETED.to_string(),
                    output: Some(output),
                    error: None,
                },
            )
        }
        Err(e) => {
            tracing::error!("job {} failed: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                JobResponse {
                    id,
                    status: JobStatus::FAILED.to_string(),
                    output: None,
                    error: Some(e.to_string()),
                },
            )
        }
    }
}
