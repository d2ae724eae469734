pub mod leonardo_generation_job_response;
pub mod leonardo_generation_response;
