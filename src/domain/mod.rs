pub mod auth;
pub mod favorites;
pub mod feed;
pub mod preferences;
pub mod user;
