//! User repository: credentials and the append-only saved location list.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, Entity as UserEntity};
use super::entities::user_location::{self, Entity as UserLocationEntity};
use crate::domain::User;
use crate::errors::{AppError, AppResult};
use crate::infra::unit_of_work::in_transaction;

/// User repository trait for dependency injection.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by exact (case-sensitive) email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user.
    ///
    /// Fails with `DuplicateEmail` when the unique email index rejects the row.
    async fn create(&self, name: String, email: String, password_hash: String) -> AppResult<User>;

    /// Append a location to the user's list and return the full list.
    ///
    /// Fails with `UserNotFound` if the user does not exist.
    async fn append_location(&self, user_id: Uuid, location: String) -> AppResult<Vec<String>>;

    /// Saved locations of a user, oldest first
    async fn locations(&self, user_id: Uuid) -> AppResult<Vec<String>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Set the owner's `updated_at` to now. The UPDATE also holds the owner
/// row lock until the surrounding transaction ends.
pub(super) async fn touch_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> AppResult<()> {
    let result = UserEntity::update_many()
        .col_expr(user::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(user::Column::Id.eq(user_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::UserNotFound);
    }
    Ok(())
}

async fn locations_of<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> AppResult<Vec<String>> {
    let locations = UserLocationEntity::find()
        .select_only()
        .column(user_location::Column::Address)
        .filter(user_location::Column::UserId.eq(user_id))
        .order_by_asc(user_location::Column::Id)
        .into_tuple::<String>()
        .all(conn)
        .await?;

    Ok(locations)
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, name: String, email: String, password_hash: String) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateEmail,
            _ => AppError::from(e),
        })?;

        Ok(User::from(model))
    }

    async fn append_location(&self, user_id: Uuid, location: String) -> AppResult<Vec<String>> {
        in_transaction(&self.db, IsolationLevel::ReadCommitted, move |txn| {
            Box::pin(async move {
                touch_user(txn, user_id).await?;

                user_location::ActiveModel {
                    user_id: Set(user_id),
                    address: Set(location),
                    created_at: Set(chrono::Utc::now()),
                    ..Default::default()
                }
                .insert(txn)
                .await?;

                locations_of(txn, user_id).await
            })
        })
        .await
    }

    async fn locations(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        locations_of(&self.db, user_id).await
    }
}
