use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("Permission denied")]
    Forbidden,

    #[error("{0}")]
    Conflict(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidInput(_) | DomainError::EmptyOrder => {
                AppError::BadRequest(e.to_string())
            }
            DomainError::ProductNotFound(_) | DomainError::NotFound(_) => {
                AppError::NotFound(e.to_string())
            }
            DomainError::InvalidCredentials => AppError::Unauthorized("invalid credentials"),
            DomainError::InvalidToken => AppError::Unauthorized("invalid or expired token"),
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::Cancelled => AppError::Cancelled,
            DomainError::MisconfiguredSecret
            | DomainError::StoreUnavailable(_)
            | DomainError::Internal(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Internal(detail) => {
                log::error!("Request failed: {}", detail);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("Product 1 not found".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn internal_error_body_hides_detail() {
        let resp = AppError::Internal("password column missing".to_string()).error_response();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Internal server error");
    }

    #[test]
    fn internal_error_display() {
        assert_eq!(
            AppError::Internal("msg".to_string()).to_string(),
            "Internal error: msg"
        );
    }

    #[test]
    fn empty_order_maps_to_bad_request() {
        let app_err: AppError = DomainError::EmptyOrder.into();
        assert_eq!(app_err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn product_not_found_maps_to_404_with_id() {
        let app_err: AppError = DomainError::ProductNotFound(2).into();
        assert_eq!(app_err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(app_err.to_string(), "Product 2 not found");
    }

    #[test]
    fn credential_and_token_failures_are_401() {
        for err in [DomainError::InvalidCredentials, DomainError::InvalidToken] {
            let app_err: AppError = err.into();
            assert_eq!(app_err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn forbidden_maps_to_403() {
        let app_err: AppError = DomainError::Forbidden.into();
        assert_eq!(app_err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn store_and_secret_failures_map_to_500() {
        for err in [
            DomainError::StoreUnavailable("down".to_string()),
            DomainError::MisconfiguredSecret,
        ] {
            let app_err: AppError = err.into();
            assert!(matches!(app_err, AppError::Internal(_)));
        }
    }

    #[test]
    fn cancelled_maps_to_503() {
        let app_err: AppError = DomainError::Cancelled.into();
        assert_eq!(app_err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
