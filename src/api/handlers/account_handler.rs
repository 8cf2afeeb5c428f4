//! Handlers for the caller's own profile, locations and addresses.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{MSG_ADDRESS_ADDED, MSG_LOCATION_SAVED};
use crate::domain::{AddressInput, Profile};
use crate::errors::{AppResult, ErrorResponse};
use crate::services::AuthUser;

/// Save location request; emptiness is checked by the account service
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SaveLocationRequest {
    /// Free-text location picked on the map
    #[schema(example = "221B Baker Street, London")]
    pub selected_address: String,
}

/// Saved locations after an append
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocationsResponse {
    #[schema(example = "Location saved successfully")]
    pub message: String,
    pub locations: Vec<String>,
}

/// Address references after an add
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddressesResponse {
    #[schema(example = "Address added successfully")]
    pub message: String,
    pub addresses: Vec<Uuid>,
}

/// Create authenticated account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/savelocation", post(save_location))
        .route("/addaddress", post(add_address))
        .route("/getuser", get(get_user))
}

/// Append a location to the caller's saved list
#[utoipa::path(
    post,
    path = "/api/v3/savelocation",
    tag = "Account",
    request_body = SaveLocationRequest,
    responses(
        (status = 200, description = "Location saved", body = LocationsResponse),
        (status = 400, description = "Location missing", body = ErrorResponse),
        (status = 401, description = "Not authenticated or token expired", body = ErrorResponse),
        (status = 403, description = "Invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn save_location(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<SaveLocationRequest>,
) -> AppResult<Json<LocationsResponse>> {
    let locations = state
        .accounts
        .append_location(user.id, payload.selected_address)
        .await?;

    Ok(Json(LocationsResponse {
        message: MSG_LOCATION_SAVED.to_string(),
        locations,
    }))
}

/// Add a structured address owned by the caller
#[utoipa::path(
    post,
    path = "/api/v3/addaddress",
    tag = "Account",
    request_body = AddressInput,
    responses(
        (status = 200, description = "Address added", body = AddressesResponse),
        (status = 400, description = "Missing field or invalid label", body = ErrorResponse),
        (status = 401, description = "Not authenticated or token expired", body = ErrorResponse),
        (status = 403, description = "Invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_address(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<AddressInput>,
) -> AppResult<Json<AddressesResponse>> {
    let addresses = state.accounts.add_address(user.id, payload).await?;

    Ok(Json(AddressesResponse {
        message: MSG_ADDRESS_ADDED.to_string(),
        addresses,
    }))
}

/// Get the caller's profile with addresses expanded
#[utoipa::path(
    get,
    path = "/api/v3/getuser",
    tag = "Account",
    responses(
        (status = 200, description = "Caller profile", body = Profile),
        (status = 401, description = "Not authenticated or token expired", body = ErrorResponse),
        (status = 403, description = "Invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Profile>> {
    let profile = state.accounts.get_profile(user.id).await?;
    Ok(Json(profile))
}
