pub mod client;
pub mod structs;
pub mod value;
