use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

/// One failed constraint on a request field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

/// Every failure a handler or pipeline stage can report to the client.
///
/// Status codes are decided in exactly one place, [`ApiError::into_response`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("unprocessable body: {0}")]
    Unprocessable(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("store failure")]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, errors) = match self {
            ApiError::Unauthorized => ("Unauthorized".to_string(), Vec::new()),
            ApiError::InvalidCredentials => {
                ("Invalid credentials. Please try again.".to_string(), Vec::new())
            }
            ApiError::Forbidden => (
                "You don't have permission to access the requested resource.".to_string(),
                Vec::new(),
            ),
            ApiError::NotFound => ("Requested item was not found.".to_string(), Vec::new()),
            ApiError::Conflict => ("Item already exists.".to_string(), Vec::new()),
            ApiError::BadRequest(msg) | ApiError::Unprocessable(msg) => (msg, Vec::new()),
            ApiError::Validation(fields) => ("Validation Error".to_string(), fields),
            ApiError::Internal(detail) => {
                error!(%detail, "internal error");
                ("Something went wrong!".to_string(), Vec::new())
            }
            ApiError::Store(e) => {
                error!(error = ?e, "store failure");
                ("Something went wrong!".to_string(), Vec::new())
            }
        };

        if status.is_client_error() && status != StatusCode::UNAUTHORIZED {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorBody { message, errors })).into_response()
    }
}
