pub mod core;
pub mod handlers;
pub mod history;
pub mod metrics;
pub mod models;
pub mod navigation;
pub mod prediction;
pub mod stores;
pub mod utils;
pub mod validation;
