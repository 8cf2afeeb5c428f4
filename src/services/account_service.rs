//! Account service - Registration, login and profile mutations.
//!
//! DDD: Uses domain Password value object for hashing and domain
//! NewAddress for label validation, Unit of Work for repository access.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use uuid::Uuid;

use super::TokenService;
use crate::config::MSG_LOCATION_REQUIRED;
use crate::domain::{AddressInput, NewAddress, Password, Profile, User, UserSummary};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Verified against when the email is unknown, so both login paths hash.
static TIMING_GUARD: Lazy<Option<Password>> =
    Lazy::new(|| Password::new("placebook-timing-guard").ok());

/// Token and public user fields returned by register and login
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: UserSummary,
}

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user and issue a token
    async fn register(&self, name: String, email: String, password: String)
        -> AppResult<AuthSession>;

    /// Check credentials and issue a token
    async fn login(&self, email: String, password: String) -> AppResult<AuthSession>;

    /// Append a free-text location; returns the full list, oldest first
    async fn append_location(&self, user_id: Uuid, location: String) -> AppResult<Vec<String>>;

    /// Add a structured address; returns the user's address references
    async fn add_address(&self, user_id: Uuid, input: AddressInput) -> AppResult<Vec<Uuid>>;

    /// The caller's own profile with addresses expanded
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Profile>;
}

/// Concrete implementation of AccountService using Unit of Work.
pub struct AccountManager<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: Arc<dyn TokenService>,
}

impl<U: UnitOfWork> AccountManager<U> {
    pub fn new(uow: Arc<U>, tokens: Arc<dyn TokenService>) -> Self {
        Self { uow, tokens }
    }

    fn session_for(&self, user: &User) -> AppResult<AuthSession> {
        Ok(AuthSession {
            token: self.tokens.issue(user.id, &user.email)?,
            user: UserSummary::from(user),
        })
    }
}

fn required(value: String, message: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::missing_field(message));
    }
    Ok(trimmed.to_string())
}

#[async_trait]
impl<U: UnitOfWork> AccountService for AccountManager<U> {
    async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> AppResult<AuthSession> {
        let name = required(name, "Name is required")?;
        let email = required(email, "Email is required")?;

        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = Password::new(&password)?.into_string();
        // A concurrent insert of the same email still surfaces as DuplicateEmail
        let user = self.uow.users().create(name, email, password_hash).await?;

        tracing::info!(user_id = %user.id, "User registered");
        self.session_for(&user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthSession> {
        let user = self.uow.users().find_by_email(email.trim()).await?;

        let verified = match &user {
            Some(user) => user.password().verify(&password),
            None => {
                if let Some(guard) = TIMING_GUARD.as_ref() {
                    guard.verify(&password);
                }
                false
            }
        };

        match user {
            Some(user) if verified => self.session_for(&user),
            _ => {
                tracing::warn!("Failed login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    async fn append_location(&self, user_id: Uuid, location: String) -> AppResult<Vec<String>> {
        if location.trim().is_empty() {
            return Err(AppError::missing_field(MSG_LOCATION_REQUIRED));
        }

        self.uow.users().append_location(user_id, location).await
    }

    async fn add_address(&self, user_id: Uuid, input: AddressInput) -> AppResult<Vec<Uuid>> {
        let address = NewAddress::try_from(input)?;
        let label = address.label;

        let ids = self.uow.addresses().create_for_user(user_id, address).await?;

        tracing::info!(user_id = %user_id, %label, count = ids.len(), "Address added");
        Ok(ids)
    }

    async fn get_profile(&self, user_id: Uuid) -> AppResult<Profile> {
        let users = self.uow.users();
        let addresses = self.uow.addresses();

        let (user, location, addresses) = tokio::try_join!(
            users.find_by_id(user_id),
            users.locations(user_id),
            addresses.list_for_user(user_id),
        )?;

        let user = user.ok_or(AppError::UserNotFound)?;
        Ok(Profile::new(user, location, addresses))
    }
}
