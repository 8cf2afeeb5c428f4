//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! DDD: Domain layer has NO infrastructure dependencies (except error types).
//! Contains: Entities, Value Objects, read models.

pub mod address;
pub mod password;
pub mod profile;
pub mod user;

pub use address::{Address, AddressInput, AddressLabel, NewAddress};
pub use password::Password;
pub use profile::Profile;
pub use user::{User, UserSummary};
