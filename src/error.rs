use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Missing X-User-Id header")]
    Unauthorized,

    #[error("Event is sold out")]
    SoldOut,

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::SoldOut => StatusCode::CONFLICT,
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Title too long: {0} characters (max 200)")]
    TitleTooLong(usize),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unrecognized date: {0}")]
    InvalidDate(String),

    #[error("Invalid price {0}: must be a non-negative number")]
    InvalidPrice(f64),

    #[error("Invalid capacity {0}: must be positive")]
    InvalidCapacity(i64),

    #[error("Too many tags: {0} (max 16)")]
    TooManyTags(usize),

    #[error("Invalid tag: {0:?}")]
    InvalidTag(String),

    #[error("{0} too long: {1} characters (max 100)")]
    NameTooLong(&'static str, usize),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}
