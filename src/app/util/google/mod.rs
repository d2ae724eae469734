pub mod auth;
pub mod service_account;

#[cfg(test)]
pub mod mocks;
