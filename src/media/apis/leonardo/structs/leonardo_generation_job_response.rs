use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LeonardoGenerationJobResponse {
    #[serde(rename(deserialize = "sdGenerationJob"))]
    pub sd_generation_job: LeonardoGenerationJob,
}

#[derive(Debug, Deserialize)]
pub struct LeonardoGenerationJob {
    #[serde(rename(deserialize = "generationId"))]
    pub generation_id: String,
    #[serde(rename(deserialize = "apiCreditCost"))]
    pub api_credit_cost: Option<u32>,
}
