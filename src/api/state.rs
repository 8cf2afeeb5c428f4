//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AccountService, AuthGateway, ServiceContainer, Services, TokenService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Token issuing and verification
    pub tokens: Arc<dyn TokenService>,
    /// Account use cases
    pub accounts: Arc<dyn AccountService>,
    /// Bearer header authentication
    pub gateway: Arc<AuthGateway>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::new(container.tokens(), container.accounts(), database)
    }

    /// Create application state with manually injected services.
    pub fn new(
        tokens: Arc<dyn TokenService>,
        accounts: Arc<dyn AccountService>,
        database: Arc<Database>,
    ) -> Self {
        let gateway = Arc::new(AuthGateway::new(tokens.clone()));
        Self {
            tokens,
            accounts,
            gateway,
            database,
        }
    }
}
