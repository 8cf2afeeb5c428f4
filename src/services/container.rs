//! Service Container - Centralized service access.
//!
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{AccountManager, AccountService, JwtTokenService, TokenService};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(test)]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(test, automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get token service
    fn tokens(&self) -> Arc<dyn TokenService>;

    /// Get account service
    fn accounts(&self) -> Arc<dyn AccountService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    token_service: Arc<dyn TokenService>,
    account_service: Arc<dyn AccountService>,
}

impl Services {
    pub fn new(
        token_service: Arc<dyn TokenService>,
        account_service: Arc<dyn AccountService>,
    ) -> Self {
        Self {
            token_service,
            account_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_config(config));
        let account_service = Arc::new(AccountManager::new(uow, token_service.clone()));

        Self {
            token_service,
            account_service,
        }
    }
}

impl ServiceContainer for Services {
    fn tokens(&self) -> Arc<dyn TokenService> {
        self.token_service.clone()
    }

    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }
}
