use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CogHealthResponse {
    pub status: String,
}
