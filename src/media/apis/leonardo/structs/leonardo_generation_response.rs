use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LeonardoGenerationResponse {
    pub generations_by_pk: LeonardoGeneration,
}

#[derive(Debug, Deserialize)]
pub struct LeonardoGeneration {
    pub status: String,
    #[serde(default)]
    pub generated_images: Vec<LeonardoGeneratedImage>,
}

#[derive(Debug, Deserialize)]
pub struct LeonardoGeneratedImage {
    pub url: String,
}
