pub mod job_status;
