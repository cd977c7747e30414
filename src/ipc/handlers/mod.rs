pub mod analytics;
pub mod attendance;
pub mod auth;
pub mod core;
pub mod members;
pub mod photos;
pub mod sessions;
