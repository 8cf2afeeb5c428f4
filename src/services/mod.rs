//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod account_service;
mod auth_gateway;
pub mod container;
mod token_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use account_service::{AccountManager, AccountService, AuthSession};
pub use auth_gateway::{AuthGateway, AuthUser};
pub use token_service::{Claims, JwtTokenService, TokenIdentity, TokenService};
