pub mod favorites;
pub mod feed;
pub mod health;
pub mod preferences;
pub mod user;
