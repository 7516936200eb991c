pub mod log;
pub mod receipt;
