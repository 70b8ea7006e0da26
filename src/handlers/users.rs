use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::auth::UserCreatedResponse;
use super::ErrorResponse;
use crate::domain::user::{Role, User, UserChanges, UserDraft};
use crate::errors::AppError;
use crate::extractors::AuthenticatedUser;
use crate::state::AppState;

const USER_ADMINS: &[Role] = &[Role::Admin];

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// Fields left out of the body keep their current value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        UserChanges {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserUpdatedResponse {
    pub message: String,
}

/// Public view of a user; the password hash never leaves the service.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// POST /api/users
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserCreatedResponse),
        (status = 400, description = "Invalid user", body = ErrorResponse),
        (status = 403, description = "Caller is not admin", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn create_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(USER_ADMINS)?;
    let body = body.into_inner();
    let draft = UserDraft {
        name: body.name,
        email: body.email,
        password: body.password,
        role: body.role,
    };

    let id = web::block(move || state.users.register(draft)).await??;

    Ok(HttpResponse::Created().json(UserCreatedResponse {
        id,
        message: "user created successfully".to_string(),
    }))
}

/// GET /api/users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 403, description = "Caller is not admin", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    user.require_any(USER_ADMINS)?;

    let users = web::block(move || state.users.list_users()).await??;

    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/users/{id}
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 403, description = "Caller is not admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    user.require_any(USER_ADMINS)?;
    let id = path.into_inner();

    let found = web::block(move || state.users.get_user(id)).await??;

    Ok(HttpResponse::Ok().json(UserResponse::from(found)))
}

/// PUT /api/users/{id}
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User id"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserUpdatedResponse),
        (status = 400, description = "Invalid change", body = ErrorResponse),
        (status = 403, description = "Caller is not admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(USER_ADMINS)?;
    let id = path.into_inner();
    let changes = UserChanges::from(body.into_inner());

    web::block(move || state.users.update_user(id, changes)).await??;

    Ok(HttpResponse::Ok().json(UserUpdatedResponse {
        message: "user updated successfully".to_string(),
    }))
}

/// DELETE /api/users/{id}
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User id"),
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Caller is not admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    user.require_any(USER_ADMINS)?;
    let id = path.into_inner();

    web::block(move || state.users.delete_user(id)).await??;

    Ok(HttpResponse::NoContent().finish())
}
