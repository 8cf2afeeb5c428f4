//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories for users, saved locations and addresses
//! - Unit of Work for repository access and transactions

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{AddressRepository, AddressStore, UserRepository, UserStore};
pub use unit_of_work::{in_transaction, Persistence, TxFuture, UnitOfWork};
