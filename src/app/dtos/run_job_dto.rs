use serde::Deserialize;
use serde_json::Value;

/// Job envelope posted by the serverless runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct RunJobDto {
    pub id: Option<String>,
    pub input: Value,
}
