#[non_exhaustive]
pub struct LeonardoGenerationStatus;

impl LeonardoGenerationStatus {
    pub const COMPLETE: &str = "COMPLETE";
    pub const FAILED: &str = "FAILED";

    pub fn is_terminal(status: &str) -> bool {
        status == Self::COMPLETE || status == Self::FAILED
    }
}
