use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{ApiError, FieldError};

/// JSON body that has been decoded and passed its `validator` constraints.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Unprocessable(rejection.body_text()))?;
        value
            .validate()
            .map_err(|errors| ApiError::Validation(field_errors(&errors)))?;
        Ok(Self(value))
    }
}

pub(crate) fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| FieldError {
                message: describe(&field, e),
                field: field.clone(),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn describe(field: &str, err: &ValidationError) -> String {
    let param = |name: &str| err.params.get(name).and_then(|v| v.as_u64());
    match err.code.as_ref() {
        "required" => format!("{field} field is required."),
        "length" => match (param("min"), param("max")) {
            (Some(1), _) => format!("{field} field is required."),
            (Some(min), _) => format!("{field} should be at least {min} characters long."),
            (None, Some(max)) => format!("{field} should be at most {max} characters long."),
            _ => "Invalid input.".to_string(),
        },
        "email" => "Enter a valid email address.".to_string(),
        "non_negative" => format!("{field} must not be negative."),
        _ => "Invalid input.".to_string(),
    }
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

/// Whitespace-only text counts as missing.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}

pub(crate) fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        Err(ValidationError::new("non_negative"))
    } else {
        Ok(())
    }
}
