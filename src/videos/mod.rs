pub mod dtos;
pub mod models;
pub mod records;
pub mod service;
pub mod structs;
