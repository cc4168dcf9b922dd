//! `ValidatedJson` extractor: parses a JSON body and runs its validators.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::{Validate, ValidationErrors};

use seathold_core::error::AppError;

use crate::error::ApiError;

/// JSON request body that passed `validator` checks.
///
/// Malformed bodies and failed validations both reject with a
/// `VALIDATION_ERROR` response.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        value.validate().map_err(validation_error)?;
        Ok(Self(value))
    }
}

/// Collapse field validation failures into one `AppError`.
fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect();
    messages.sort();
    messages.dedup();

    let message = if messages.is_empty() {
        "Invalid request body".to_string()
    } else {
        messages.join("; ")
    };

    AppError::validation(message).with_details(json!({ "fields": messages }))
}
