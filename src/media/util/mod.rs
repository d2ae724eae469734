pub mod data_uri;
pub mod firebase_storage;
