use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{
    app::{errors::PipelineError, util::google::auth::GoogleAuth},
    videos::{models::video_record::VideoRecord, records::RecordStore},
};

use super::{structs::firestore_document_response::FirestoreDocumentResponse, value};

#[derive(Debug)]
pub struct FirestoreClient {
    pub auth: GoogleAuth,
    pub http_client: reqwest::Client,
    pub api_url: String,
    pub collection: String,
}

impl FirestoreClient {
    pub fn new(
        auth: GoogleAuth,
        http_client: reqwest::Client,
        api_url: &str,
        collection: &str,
    ) -> FirestoreClient {
        FirestoreClient {
            auth,
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
        }
    }

    pub fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.api_url, self.auth.service_account.project_id, collection
        )
    }

    /// Adds a document with a database-assigned id.
    pub async fn create_document(
        &self,
        collection: &str,
        fields: Value,
    ) -> Result<FirestoreDocumentResponse, PipelineError> {
        let token = self.auth.access_token().await?;

        let result = self
            .http_client
            .post(self.documents_url(collection))
            .bearer_auth(token)
            .json(&json!({ "fields": fields }))
            .send()
            .await;

        match result {
            Ok(res) => {
                let status = res.status();
                match res.text().await {
                    Ok(text) => match serde_json::from_str(&text) {
                        Ok(document) if status.is_success() => Ok(document),
                        _ => {
                            tracing::error!(%text);
                            Err(PipelineError::Database(format!(
                                "firestore answered {} for {}",
                                status, collection
                            )))
                        }
                    },
                    Err(e) => {
                        tracing::error!(%e);
                        Err(PipelineError::Database(e.to_string()))
                    }
                }
            }
            Err(e) => {
                tracing::error!(%e);
                Err(PipelineError::Database(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl RecordStore for FirestoreClient {
    async fn create_video_record(&self, record: &VideoRecord) -> Result<String, PipelineError> {
        let fields = match serde_json::to_value(record) {
            Ok(Value::Object(map)) => value::to_firestore_fields(&map),
            _ => {
                return Err(PipelineError::Database(
                    "video record did not serialize to an object".to_string(),
                ))
            }
        };

        tracing::info!("writing video record to {}", self.collection);
        let document = self.create_document(&self.collection, fields).await?;

        tracing::info!(
            "video record {} written at {}",
            document.id(),
            document.update_time.as_deref().unwrap_or("unknown time")
        );

        Ok(document.id().to_string())
    }
}
