use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use uuid::Uuid;

use crate::app::errors::PipelineError;

use super::{
    models::{
        file_properties::{FileProperties, LocalArtifacts},
        video_artifacts::VideoArtifacts,
    },
    store::ArtifactStore,
    thumbnail::Thumbnailer,
    util::data_uri::DataUri,
};

/// Turns an encoded inference output into public video and thumbnail urls.
pub struct ArtifactProcessor {
    pub work_dir: PathBuf,
    pub app_folder: String,
    pub thumbnailer: Arc<dyn Thumbnailer>,
    pub store: Arc<dyn ArtifactStore>,
}

impl ArtifactProcessor {
    pub fn thumbnail_folder(&self) -> String {
        [&self.app_folder, "/thumbnail"].concat()
    }

    pub async fn process_output(&self, output: &str) -> Result<VideoArtifacts, PipelineError> {
        let local = self.decode_to_file(output).await?;

        let result = self.thumbnail_and_upload(&local).await;
        remove_local_files(&local).await;

        result
    }

    /// Writes the decoded video to a uniquely named file in the work dir.
    pub async fn decode_to_file(&self, output: &str) -> Result<LocalArtifacts, PipelineError> {
        let data_uri = DataUri::parse(output)?;

        let id = Uuid::new_v4().to_string();
        let video_path = self
            .work_dir
            .join(format!("{}.{}", id, data_uri.extension()));
        let thumbnail_path = self.work_dir.join(format!("{}.png", id));

        tokio::fs::write(&video_path, &data_uri.data).await?;
        tracing::debug!(
            "wrote {} bytes of {} to {}",
            data_uri.data.len(),
            data_uri.mime_type,
            video_path.display()
        );

        Ok(LocalArtifacts {
            id,
            video_path,
            video_mime: data_uri.mime_type,
            thumbnail_path,
        })
    }

    async fn thumbnail_and_upload(
        &self,
        local: &LocalArtifacts,
    ) -> Result<VideoArtifacts, PipelineError> {
        self.thumbnailer
            .extract_thumbnail(&local.video_path, &local.thumbnail_path)
            .await?;

        let video = FileProperties::from_path(&local.video_path, local.video_mime.clone()).await?;
        let video_url = self.store.upload_public(video, &self.app_folder).await?;

        let thumbnail = FileProperties::from_path(&local.thumbnail_path, mime::IMAGE_PNG).await?;
        let thumbnail_url = self
            .store
            .upload_public(thumbnail, &self.thumbnail_folder())
            .await?;

        Ok(VideoArtifacts {
            video_url,
            thumbnail_url,
        })
    }
}

async fn remove_local_files(local: &LocalArtifacts) {
    for path in [&local.video_path, &local.thumbnail_path] {
        remove_if_exists(path).await;
    }
}

async fn remove_if_exists(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("could not remove {}: {}", path.display(), e),
    }
}
