pub mod api;
pub mod claim;
pub mod session;
