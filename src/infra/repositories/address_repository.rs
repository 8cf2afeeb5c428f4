//! Address repository. Addresses are always created for, and listed by,
//! their owning user.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IsolationLevel, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::address::{self, Entity as AddressEntity};
use crate::domain::{Address, NewAddress};
use super::user_repository::touch_user;
use crate::errors::{AppError, AppResult};
use crate::infra::unit_of_work::in_transaction;

/// Address repository trait for dependency injection.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Create an address owned by `user_id` and return the user's updated
    /// address references, oldest first.
    ///
    /// Runs as one transaction: fails with `UserNotFound` and writes nothing
    /// if the user does not exist.
    async fn create_for_user(&self, user_id: Uuid, address: NewAddress) -> AppResult<Vec<Uuid>>;

    /// All addresses owned by a user, oldest first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Address>>;
}

/// Concrete implementation of AddressRepository
pub struct AddressStore {
    db: DatabaseConnection,
}

impl AddressStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn address_ids_of<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> AppResult<Vec<Uuid>> {
    let ids = AddressEntity::find()
        .select_only()
        .column(address::Column::Id)
        .filter(address::Column::UserId.eq(user_id))
        .order_by_asc(address::Column::CreatedAt)
        .order_by_asc(address::Column::Id)
        .into_tuple::<Uuid>()
        .all(conn)
        .await?;

    Ok(ids)
}

#[async_trait]
impl AddressRepository for AddressStore {
    async fn create_for_user(&self, user_id: Uuid, address: NewAddress) -> AppResult<Vec<Uuid>> {
        in_transaction(&self.db, IsolationLevel::ReadCommitted, move |txn| {
            Box::pin(async move {
                // Owner row stays locked until commit, serializing concurrent adds
                touch_user(txn, user_id).await?;

                let now = chrono::Utc::now();
                address::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    label: Set(address.label.as_str().to_string()),
                    street: Set(address.street),
                    city: Set(address.city),
                    state: Set(address.state),
                    postal_code: Set(address.postal_code),
                    country: Set(address.country),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await?;

                address_ids_of(txn, user_id).await
            })
        })
        .await
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Address>> {
        let models = AddressEntity::find()
            .filter(address::Column::UserId.eq(user_id))
            .order_by_asc(address::Column::CreatedAt)
            .order_by_asc(address::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Address::from).collect())
    }
}
