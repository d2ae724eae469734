use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StorageObjectResponse {
    pub name: String,
    pub bucket: String,
    #[serde(rename(deserialize = "contentType"))]
    pub content_type: Option<String>,
    pub size: Option<String>,
}
