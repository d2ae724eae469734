pub mod run_job_dto;
