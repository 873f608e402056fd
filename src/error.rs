use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    InternalServerError(String),
    ValidationError(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            success: false,
            message: self.to_string(),
        };

        match self {
            ApiError::BadRequest(_) => HttpResponse::BadRequest().json(error_response),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(error_response),
            ApiError::Unauthorized(_) => HttpResponse::Unauthorized().json(error_response),
            ApiError::Forbidden(_) => HttpResponse::Forbidden().json(error_response),
            ApiError::Conflict(_) => HttpResponse::Conflict().json(error_response),
            ApiError::ValidationError(_) => HttpResponse::UnprocessableEntity().json(error_response),
            ApiError::InternalServerError(_) => HttpResponse::InternalServerError().json(error_response),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}

// Storefront-specific errors
impl ApiError {
    pub fn bad_request(msg: &str) -> Self {
        ApiError::BadRequest(msg.to_string())
    }

    pub fn menu_item_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Menu item with ID '{}' not found", id))
    }

    pub fn line_item_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Cart item with ID '{}' not found", id))
    }

    pub fn stock_item_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("Stock item with ID '{}' not found", id))
    }

    pub fn mood_not_found(key: &str) -> Self {
        ApiError::NotFound(format!("Mood '{}' not found", key))
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized("Invalid email or password".to_string())
    }

    pub fn login_required() -> Self {
        ApiError::Unauthorized("Please log in first".to_string())
    }

    pub fn admin_only() -> Self {
        ApiError::Forbidden("Access denied. Only admins can open this page".to_string())
    }

    pub fn payment_in_progress() -> Self {
        ApiError::Conflict("A payment is being processed, please wait".to_string())
    }

    pub fn invalid_amount() -> Self {
        ApiError::ValidationError("Invalid amount".to_string())
    }

    pub fn state_unavailable() -> Self {
        ApiError::InternalServerError("Storefront state is unavailable".to_string())
    }
}
