use async_trait::async_trait;
use reqwest::{header, Url};
use serde_json::json;

use crate::{
    app::{errors::PipelineError, util::google::auth::GoogleAuth},
    media::{models::file_properties::FileProperties, store::ArtifactStore},
};

use super::structs::storage_object_response::StorageObjectResponse;

pub static PUBLIC_URL: &str = "https://storage.googleapis.com";

#[derive(Debug)]
pub struct FirebaseStorage {
    pub auth: GoogleAuth,
    pub http_client: reqwest::Client,
    pub api_url: String,
    pub bucket: String,
}

impl FirebaseStorage {
    pub fn new(
        auth: GoogleAuth,
        http_client: reqwest::Client,
        api_url: &str,
        bucket: &str,
    ) -> FirebaseStorage {
        FirebaseStorage {
            auth,
            http_client,
            api_url: api_url.to_string(),
            bucket: bucket.to_string(),
        }
    }

    pub async fn upload_file(
        &self,
        file_properties: FileProperties,
        object_name: &str,
    ) -> Result<StorageObjectResponse, PipelineError> {
        let token = self.auth.access_token().await?;
        let url = api_path(&self.api_url, &["upload", "storage", "v1", "b", &self.bucket, "o"])?;

        let result = self
            .http_client
            .post(url)
            .query(&[("uploadType", "media"), ("name", object_name)])
            .bearer_auth(token)
            .header(header::CONTENT_TYPE, file_properties.mime_type.to_string())
            .body(file_properties.data)
            .send()
            .await;

        match result {
            Ok(res) => {
                let status = res.status();
                match res.text().await {
                    Ok(text) => match serde_json::from_str(&text) {
                        Ok(object) if status.is_success() => Ok(object),
                        _ => {
                            tracing::error!(%text);
                            Err(PipelineError::Storage(format!(
                                "upload of {} answered {}",
                                object_name, status
                            )))
                        }
                    },
                    Err(e) => {
                        tracing::error!(%e);
                        Err(PipelineError::Storage(e.to_string()))
                    }
                }
            }
            Err(e) => {
                tracing::error!(%e);
                Err(PipelineError::Storage(e.to_string()))
            }
        }
    }

    pub async fn make_public(&self, object_name: &str) -> Result<(), PipelineError> {
        let token = self.auth.access_token().await?;
        let url = api_path(
            &self.api_url,
            &["storage", "v1", "b", &self.bucket, "o", object_name, "acl"],
        )?;

        let result = self
            .http_client
            .post(url)
            .bearer_auth(token)
            .json(&json!({ "entity": "allUsers", "role": "READER" }))
            .send()
            .await;

        match result {
            Ok(res) if res.status().is_success() => Ok(()),
            Ok(res) => {
                let status = res.status();
                tracing::error!("{:?}", res.text().await);
                Err(PipelineError::Storage(format!(
                    "making {} public answered {}",
                    object_name, status
                )))
            }
            Err(e) => {
                tracing::error!(%e);
                Err(PipelineError::Storage(e.to_string()))
            }
        }
    }

    pub fn public_url(&self, object_name: &str) -> Result<String, PipelineError> {
        let mut segments = vec![self.bucket.as_str()];
        segments.extend(object_name.split('/'));

        Ok(api_path(PUBLIC_URL, &segments)?.to_string())
    }
}

#[async_trait]
impl ArtifactStore for FirebaseStorage {
    async fn upload_public(
        &self,
        file_properties: FileProperties,
        folder: &str,
    ) -> Result<String, PipelineError> {
        let object_name = [folder, "/", &file_properties.file_name].concat();

        let object = self.upload_file(file_properties, &object_name).await?;
        self.make_public(&object.name).await?;

        tracing::info!(
            "uploaded {} ({} bytes) to {}/{}",
            object.content_type.as_deref().unwrap_or("unknown type"),
            object.size.as_deref().unwrap_or("?"),
            object.bucket,
            object.name
        );
        self.public_url(&object.name)
    }
}

/// Appends percent-encoded path segments to `base`.
fn api_path(base: &str, segments: &[&str]) -> Result<Url, PipelineError> {
    let mut url = Url::parse(base).map_err(|e| PipelineError::Storage(e.to_string()))?;

    url.path_segments_mut()
        .map_err(|_| PipelineError::Storage(format!("{} cannot take a path", base)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
