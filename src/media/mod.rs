pub mod apis;
pub mod models;
pub mod service;
pub mod store;
pub mod thumbnail;
pub mod util;
