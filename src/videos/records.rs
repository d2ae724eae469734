use async_trait::async_trait;

use crate::app::errors::PipelineError;

use super::models::video_record::VideoRecord;

/// Document database holding the video feed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists `record` and returns the id the database assigned.
    async fn create_video_record(&self, record: &VideoRecord) -> Result<String, PipelineError>;
}
