#[non_exhaustive]
pub struct JobStatus;

impl JobStatus {
    pub const COMPLETED: &str = "COMPLETED";
    pub const FAILED: &str = "FAILED";
}
