//! Address domain entity, label enumeration and creation input.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{
    ADDRESS_LABEL_HOME, ADDRESS_LABEL_OFFICE, ADDRESS_LABEL_OTHER, MSG_ALL_FIELDS_REQUIRED,
};
use crate::errors::{AppError, AppResult};

/// Address label enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AddressLabel {
    #[default]
    Home,
    Office,
    Other,
}

impl AddressLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressLabel::Home => ADDRESS_LABEL_HOME,
            AddressLabel::Office => ADDRESS_LABEL_OFFICE,
            AddressLabel::Other => ADDRESS_LABEL_OTHER,
        }
    }
}

impl FromStr for AddressLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ADDRESS_LABEL_HOME => Ok(AddressLabel::Home),
            ADDRESS_LABEL_OFFICE => Ok(AddressLabel::Office),
            ADDRESS_LABEL_OTHER => Ok(AddressLabel::Other),
            other => Err(AppError::InvalidLabel(other.to_string())),
        }
    }
}

impl std::fmt::Display for AddressLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address domain entity, owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    #[serde(skip_serializing, default)]
    pub user_id: Uuid,
    pub label: AddressLabel,
    #[schema(example = "221B Baker Street")]
    pub street: String,
    #[schema(example = "London")]
    pub city: String,
    #[schema(example = "Greater London")]
    pub state: String,
    #[schema(example = "NW1 6XE")]
    pub postal_code: String,
    #[schema(example = "United Kingdom")]
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw address form, as submitted by the client.
///
/// Missing JSON fields deserialize as empty strings so they are reported
/// as missing (`MissingField`) rather than as malformed JSON.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressInput {
    /// One of Home, Office, Other
    #[validate(length(min = 1, code = "required", message = "All fields are required"))]
    #[schema(example = "Home")]
    pub label: String,
    #[validate(length(min = 1, code = "required", message = "All fields are required"))]
    #[schema(example = "221B Baker Street")]
    pub street: String,
    #[validate(length(min = 1, code = "required", message = "All fields are required"))]
    #[schema(example = "London")]
    pub city: String,
    #[validate(length(min = 1, code = "required", message = "All fields are required"))]
    #[schema(example = "Greater London")]
    pub state: String,
    #[validate(length(min = 1, code = "required", message = "All fields are required"))]
    #[schema(example = "NW1 6XE")]
    pub postal_code: String,
    #[validate(length(min = 1, code = "required", message = "All fields are required"))]
    #[schema(example = "United Kingdom")]
    pub country: String,
}

/// Validated address ready for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub label: AddressLabel,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl TryFrom<AddressInput> for NewAddress {
    type Error = AppError;

    /// Presence is checked before the label so an empty label reads as missing.
    fn try_from(input: AddressInput) -> AppResult<Self> {
        let fields = [
            &input.label,
            &input.street,
            &input.city,
            &input.state,
            &input.postal_code,
            &input.country,
        ];
        if fields.iter().any(|value| value.trim().is_empty()) {
            return Err(AppError::missing_field(MSG_ALL_FIELDS_REQUIRED));
        }

        Ok(Self {
            label: input.label.parse()?,
            street: input.street,
            city: input.city,
            state: input.state,
            postal_code: input.postal_code,
            country: input.country,
        })
    }
}
