pub mod auth;
pub mod scoring;
