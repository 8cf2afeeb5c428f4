//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{account_handler, auth_handler};
use crate::domain::{Address, AddressInput, AddressLabel, Profile, UserSummary};
use crate::errors::ErrorResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Placebook API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Placebook API",
        version = "0.1.0",
        description = "Accounts, saved map locations and postal addresses for the Placebook front end",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Account endpoints
        account_handler::save_location,
        account_handler::add_address,
        account_handler::get_user,
    ),
    components(
        schemas(
            // Domain types
            UserSummary,
            AddressLabel,
            Address,
            AddressInput,
            Profile,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::AuthResponse,
            // Account types
            account_handler::SaveLocationRequest,
            account_handler::LocationsResponse,
            account_handler::AddressesResponse,
            // Shared
            MessageResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Account", description = "Saved locations, addresses and profile of the caller")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token returned by /api/v3/login"))
                        .build(),
                ),
            );
        }
    }
}
