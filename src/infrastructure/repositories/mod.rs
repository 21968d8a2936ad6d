pub mod catalog_repository;
pub mod pg_catalog_repository;
pub mod pg_preference_repository;
pub mod preference_repository;
pub mod user_repository;

pub use catalog_repository::{CatalogRepository, PostFilter};
pub use pg_catalog_repository::PgCatalogRepository;
pub use pg_preference_repository::PgPreferenceRepository;
pub use preference_repository::PreferenceRepository;
pub use user_repository::UserRepository;
