use std::path::{Path, PathBuf};

use bytes::Bytes;
use mime::Mime;

use crate::app::errors::PipelineError;

/// A local artifact ready to be pushed to object storage.
#[derive(Debug)]
pub struct FileProperties {
    pub file_name: String,
    pub mime_type: Mime,
    pub data: Bytes,
}

impl FileProperties {
    pub async fn from_path(path: &Path, mime_type: Mime) -> Result<Self, PipelineError> {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            return Err(PipelineError::Storage(format!(
                "{} has no usable file name",
                path.display()
            )));
        };

        let data = tokio::fs::read(path).await?;

        Ok(FileProperties {
            file_name: file_name.to_string(),
            mime_type,
            data: Bytes::from(data),
        })
    }
}

/// The local files produced for one generation, named after a shared id.
#[derive(Debug, Clone)]
pub struct LocalArtifacts {
    pub id: String,
    pub video_path: PathBuf,
    pub video_mime: Mime,
    pub thumbnail_path: PathBuf,
}
