//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod address_repo;
pub mod distance_repo;
pub mod home_repo;
pub mod location_repo;
pub mod user_repo;

pub use address_repo::AddressRepo;
pub use distance_repo::DistanceRepo;
pub use home_repo::HomeRepo;
pub use location_repo::LocationRepo;
pub use user_repo::UserRepo;
