use serde::Serialize;

/// Public urls of an uploaded video and its thumbnail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoArtifacts {
    pub video_url: String,
    pub thumbnail_url: String,
}
