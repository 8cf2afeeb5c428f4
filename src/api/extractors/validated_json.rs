//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::AppError;

/// JSON body extractor that runs `validator` rules before the handler.
///
/// Rules tagged `code = "required"` surface as `AppError::MissingField`,
/// matching what the service layer reports for blank input. Body
/// rejections and every other rule surface as `AppError::Validation`.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value.validate().map_err(|e| validation_error(&e))?;

        Ok(ValidatedJson(value))
    }
}

const REQUIRED_CODE: &str = "required";

/// Missing fields win over other rule failures on the same body.
fn validation_error(errors: &ValidationErrors) -> AppError {
    let missing = format_validation_errors(errors, |e| e.code == REQUIRED_CODE);
    if !missing.is_empty() {
        return AppError::missing_field(missing);
    }
    AppError::validation(format_validation_errors(errors, |_| true))
}

/// Collapse field errors into one message, stable across runs.
///
/// Several fields usually share a message ("All fields are required"),
/// so duplicates are dropped.
fn format_validation_errors(
    errors: &ValidationErrors,
    keep: impl Fn(&ValidationError) -> bool,
) -> String {
    let keep = &keep;
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().filter(move |e| keep(*e)).map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>();

    messages.sort();
    messages.dedup();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth_handler::RegisterRequest;
    use crate::domain::AddressInput;

    #[test]
    fn test_shared_messages_collapse() {
        let errors = AddressInput::default().validate().unwrap_err();
        assert_eq!(
            format_validation_errors(&errors, |_| true),
            "All fields are required"
        );
    }

    #[test]
    fn test_absent_address_fields_are_missing_field() {
        let errors = AddressInput::default().validate().unwrap_err();
        assert!(matches!(
            validation_error(&errors),
            AppError::MissingField(msg) if msg == "All fields are required"
        ));
    }

    #[test]
    fn test_empty_email_is_missing_not_malformed() {
        let request = RegisterRequest {
            name: "Jane".into(),
            email: String::new(),
            password: "pw".into(),
        };
        let errors = request.validate().unwrap_err();
        assert!(matches!(
            validation_error(&errors),
            AppError::MissingField(msg) if msg == "Email is required"
        ));
    }

    #[test]
    fn test_malformed_email_is_validation_error() {
        let request = RegisterRequest {
            name: "Jane".into(),
            email: "not-an-email".into(),
            password: "pw".into(),
        };
        let errors = request.validate().unwrap_err();
        assert!(matches!(
            validation_error(&errors),
            AppError::Validation(msg) if msg == "Invalid email format"
        ));
    }
}
