pub static API_URL: &str = "https://cloud.leonardo.ai/api/rest/v1";
