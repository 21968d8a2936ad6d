pub mod middleware;
pub mod request_id;

pub use middleware::{auth_middleware, optional_auth_middleware, AuthUser, MaybeAuthUser};
pub use request_id::{request_id_middleware, RequestId};
