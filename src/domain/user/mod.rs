pub mod dto;
pub mod model;
pub mod service;

pub use dto::{ProfileResponse, UpdateProfileRequest};
pub use model::User;
pub use service::UserService;
