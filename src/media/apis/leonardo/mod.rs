pub mod config;
pub mod enums;
pub mod service;
pub mod structs;
