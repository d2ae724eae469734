use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct FirestoreDocumentResponse {
    pub name: String,
    #[serde(rename(deserialize = "updateTime"))]
    pub update_time: Option<String>,
}

impl FirestoreDocumentResponse {
    /// The document id is the last segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}
