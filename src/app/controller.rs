use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::AppState;

use super::{
    dtos::run_job_dto::RunJobDto,
    models::{api_error::ApiError, json_from_request::JsonFromRequest},
    service,
    structs::job_response::JobResponse,
};

pub async fn get_root(State(_state): State<Arc<AppState>>) -> Result<(), ApiError> {
    Ok(())
}

pub async fn run_sync(
    State(state): State<Arc<AppState>>,
    JsonFromRequest(dto): JsonFromRequest<RunJobDto>,
) -> (StatusCode, Json<JobResponse>) {
    let (code, response) = service::run_job(dto, &state.pipeline).await;

    (code, Json(response))
}
