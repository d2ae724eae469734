#[non_exhaustive]
pub struct CogHealthStatus;

impl CogHealthStatus {
    pub const READY: &str = "READY";
}
