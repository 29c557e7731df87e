use actix_web::{HttpResponse, ResponseError};
use catalog::CatalogError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("product not found")]
    NotFound,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal() -> Self {
        ApiError::Internal("internal server error".to_owned())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(reason) => ApiError::BadRequest(reason),
            CatalogError::NotFound(_) => ApiError::NotFound,
            // Clients get a short generic reason, the detail goes to the log.
            CatalogError::Storage(reason) => {
                log::error!("storage failure: {reason}");
                ApiError::Internal("failed to access product data".to_owned())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({ "error": self.to_string() });
        match self {
            ApiError::BadRequest(_) => HttpResponse::BadRequest().json(body),
            ApiError::NotFound => HttpResponse::NotFound().json(body),
            ApiError::Internal(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}
