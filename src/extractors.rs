use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};

use crate::domain::auth::Claims;
use crate::domain::user::Role;
use crate::errors::AppError;
use crate::state::AppState;

/// Caller identified by a valid `Authorization: Bearer <token>` header.
///
/// Taking this as a handler argument makes the route require a token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn claims(&self) -> &Claims {
        &self.0
    }

    pub fn require_any(&self, allowed: &[Role]) -> Result<(), AppError> {
        self.0.require_any(allowed).map_err(|e| {
            log::info!("User {} ({}) denied: needs one of {:?}", self.0.sub, self.0.role, allowed);
            AppError::from(e)
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::Internal("application state is not registered".to_string()))?;

    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AppError::Unauthorized("missing authorization header"))?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized("invalid or expired token"))?;

    let claims = state.credentials.authenticate(token)?;
    Ok(AuthenticatedUser(claims))
}
