//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod address_repository;
pub(crate) mod entities;
mod user_repository;

pub use address_repository::{AddressRepository, AddressStore};
pub use user_repository::{UserRepository, UserStore};
