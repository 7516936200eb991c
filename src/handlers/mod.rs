pub mod auth;
pub mod fallback;
pub mod health;
pub mod history;
pub mod metrics;
pub mod navigation;
pub mod pages;
pub mod predict;
pub mod session;
