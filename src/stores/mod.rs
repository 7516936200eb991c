pub mod credential_store;
pub mod file_credentials;
pub mod memory_credentials;
pub mod session_store;
