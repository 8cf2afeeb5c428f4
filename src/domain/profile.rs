//! Profile read model: a user with locations and expanded addresses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Address, User};

/// Composed profile view returned by `GET /api/v3/getuser`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Saved free-text locations, oldest first
    pub location: Vec<String>,
    /// Owned addresses in insertion order
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(user: User, location: Vec<String>, addresses: Vec<Address>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            location,
            addresses,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
