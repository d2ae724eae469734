pub mod firestore;
pub mod google;
pub mod poll;
pub mod time;

#[cfg(test)]
pub mod test_server;
