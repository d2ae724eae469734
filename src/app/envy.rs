use std::time::Duration;

use serde::Deserialize;

use crate::media::{
    apis::{cog, leonardo},
    util::firebase_storage::service::PUBLIC_URL,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    pub port: Option<u16>,

    pub firebase_key: String,
    pub sadtalker_firebase_key: String,
    pub storage_bucket: String,

    pub leonard_api_key: String,
    pub leonardo_api_url: Option<String>,
    pub generation_poll_interval_secs: Option<u64>,
    pub generation_max_wait_secs: Option<u64>,

    pub cog_url: Option<String>,
    pub cog_command: Option<String>,
    pub cog_ready_max_wait_secs: Option<u64>,

    pub app_folder: Option<String>,
    pub work_dir: Option<String>,

    pub storage_api_url: Option<String>,
    pub firestore_api_url: Option<String>,
    pub firestore_collection: Option<String>,
}

impl Envy {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(3000)
    }

    pub fn leonardo_api_url(&self) -> &str {
        self.leonardo_api_url
            .as_deref()
            .unwrap_or(leonardo::config::API_URL)
    }

    pub fn generation_poll_interval(&self) -> Duration {
        Duration::from_secs(self.generation_poll_interval_secs.unwrap_or(5))
    }

    pub fn generation_max_wait(&self) -> Duration {
        Duration::from_secs(self.generation_max_wait_secs.unwrap_or(600))
    }

    pub fn cog_url(&self) -> &str {
        self.cog_url.as_deref().unwrap_or(cog::config::API_URL)
    }

    pub fn cog_command(&self) -> &str {
        self.cog_command
            .as_deref()
            .unwrap_or(cog::config::SERVER_COMMAND)
    }

    pub fn cog_ready_max_wait(&self) -> Duration {
        Duration::from_secs(self.cog_ready_max_wait_secs.unwrap_or(1800))
    }

    pub fn app_folder(&self) -> &str {
        self.app_folder
            .as_deref()
            .unwrap_or("Dynamic Crafter + Midjourney")
    }

    pub fn work_dir(&self) -> &str {
        self.work_dir.as_deref().unwrap_or(".")
    }

    pub fn storage_api_url(&self) -> &str {
        self.storage_api_url.as_deref().unwrap_or(PUBLIC_URL)
    }

    pub fn firestore_api_url(&self) -> &str {
        self.firestore_api_url
            .as_deref()
            .unwrap_or("https://firestore.googleapis.com/v1")
    }

    pub fn firestore_collection(&self) -> &str {
        self.firestore_collection.as_deref().unwrap_or("videosList")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> Vec<(String, String)> {
        vec![
            ("FIREBASE_KEY".to_string(), "{}".to_string()),
            ("SADTALKER_FIREBASE_KEY".to_string(), "{}".to_string()),
            ("STORAGE_BUCKET".to_string(), "bucket".to_string()),
            ("LEONARD_API_KEY".to_string(), "key".to_string()),
        ]
    }

    #[test]
    fn applies_defaults_for_optional_variables() {
        let envy = envy::from_iter::<_, Envy>(required()).unwrap();

        assert_eq!(envy.port(), 3000);
        assert_eq!(envy.cog_url(), "http://127.0.0.1:5000");
        assert_eq!(envy.cog_command(), "python -m cog.server.http");
        assert_eq!(envy.generation_poll_interval(), Duration::from_secs(5));
        assert_eq!(envy.app_folder(), "Dynamic Crafter + Midjourney");
        assert_eq!(envy.firestore_collection(), "videosList");
    }

    #[test]
    fn reads_overrides() {
        let mut vars = required();
        vars.push(("PORT".to_string(), "8080".to_string()));
        vars.push(("GENERATION_MAX_WAIT_SECS".to_string(), "30".to_string()));
        vars.push(("COG_URL".to_string(), "http://localhost:9000".to_string()));

        let envy = envy::from_iter::<_, Envy>(vars).unwrap();

        assert_eq!(envy.port(), 8080);
        assert_eq!(envy.generation_max_wait(), Duration::from_secs(30));
        assert_eq!(envy.cog_url(), "http://localhost:9000");
    }

    #[test]
    fn missing_required_variable_is_an_error() {
        let vars: Vec<(String, String)> = required()
            .into_iter()
            .filter(|(key, _)| key != "LEONARD_API_KEY")
            .collect();

        assert!(envy::from_iter::<_, Envy>(vars).is_err());
    }
}
