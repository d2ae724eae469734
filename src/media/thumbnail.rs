use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::app::errors::PipelineError;

#[async_trait]
pub trait Thumbnailer: Send + Sync {
    /// Writes the frame at one second into `video` to `thumbnail`.
    async fn extract_thumbnail(&self, video: &Path, thumbnail: &Path) -> Result<(), PipelineError>;
}

#[derive(Debug, Clone)]
pub struct FfmpegThumbnailer {
    pub binary: String,
}

impl Default for FfmpegThumbnailer {
    fn default() -> Self {
        FfmpegThumbnailer {
            binary: "ffmpeg".to_string(),
        }
    }
}

#[async_trait]
impl Thumbnailer for FfmpegThumbnailer {
    async fn extract_thumbnail(&self, video: &Path, thumbnail: &Path) -> Result<(), PipelineError> {
        tracing::debug!("extracting thumbnail from {}", video.display());

        let output = Command::new(&self.binary)
            .arg("-y")
            .args(["-ss", "00:00:01"])
            .arg("-i")
            .arg(video)
            .args(["-vframes", "1"])
            .arg(thumbnail)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| PipelineError::Thumbnail(format!("{} failed to start: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!("ffmpeg exited with {}: {}", output.status, stderr);
            return Err(PipelineError::Thumbnail(format!(
                "{} exited with {}",
                self.binary, output.status
            )));
        }

        Ok(())
    }
}
