use serde::Serialize;

use crate::media::models::video_artifacts::VideoArtifacts;

/// Feed entry written once per generated video.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub add_to_feed: bool,
    pub comments_count: i64,
    pub likes: Vec<String>,
    pub shares: Vec<String>,
    pub thumbnail: String,
    pub uploader_id: String,
    pub video_caption: String,
    pub video_url: String,
}

impl VideoRecord {
    pub fn new(artifacts: &VideoArtifacts, prompt: &str, user_id: &str) -> Self {
        Self {
            add_to_feed: false,
            comments_count: 0,
            likes: Vec::new(),
            shares: Vec::new(),
            thumbnail: artifacts.thumbnail_url.to_string(),
            uploader_id: user_id.to_string(),
            video_caption: prompt.to_string(),
            video_url: artifacts.video_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_with_feed_field_names() {
        let artifacts = VideoArtifacts {
            video_url: "https://storage.test/v.mp4".to_string(),
            thumbnail_url: "https://storage.test/t.png".to_string(),
        };

        let record = VideoRecord::new(&artifacts, "a cat", "u1");

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "addToFeed": false,
                "commentsCount": 0,
                "likes": [],
                "shares": [],
                "thumbnail": "https://storage.test/t.png",
                "uploaderId": "u1",
                "videoCaption": "a cat",
                "videoUrl": "https://storage.test/v.mp4"
            })
        );
    }
}
