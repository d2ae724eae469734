use async_trait::async_trait;

use crate::app::errors::PipelineError;

use super::models::file_properties::FileProperties;

/// Object storage that hands back a public url for every upload.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn upload_public(
        &self,
        file_properties: FileProperties,
        folder: &str,
    ) -> Result<String, PipelineError>;
}
