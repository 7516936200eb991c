pub mod auth;
pub mod currency;
pub mod time;
