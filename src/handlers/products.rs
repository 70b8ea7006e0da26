use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CreatedResponse, ErrorResponse};
use crate::domain::product::{Product, ProductDraft};
use crate::domain::user::Role;
use crate::errors::AppError;
use crate::extractors::AuthenticatedUser;
use crate::state::AppState;

const CATALOGUE_EDITORS: &[Role] = &[Role::Admin, Role::Employee];

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal price, preferably as a string to avoid floating-point issues, e.g. "9.99"
    #[schema(value_type = String, example = "9.99")]
    pub price: BigDecimal,
}

impl From<ProductRequest> for ProductDraft {
    fn from(req: ProductRequest) -> Self {
        ProductDraft {
            name: req.name,
            description: req.description,
            price: req.price,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "9.99")]
    pub price: BigDecimal,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = CreatedResponse),
        (status = 400, description = "Invalid product", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not admin or employee", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn create_product(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(CATALOGUE_EDITORS)?;
    let draft = ProductDraft::from(body.into_inner());

    let id = web::block(move || state.products.create_product(draft)).await??;

    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "products"
)]
pub async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products = web::block(move || state.products.list_products()).await??;

    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    tag = "products"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let product = web::block(move || state.products.get_product(id)).await??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// PUT /api/products/{id}
///
/// Replaces name, description and price.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    request_body = ProductRequest,
    responses(
        (status = 204, description = "Product updated"),
        (status = 400, description = "Invalid product", body = ErrorResponse),
        (status = 403, description = "Caller is not admin or employee", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn update_product(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    user.require_any(CATALOGUE_EDITORS)?;
    let id = path.into_inner();
    let draft = ProductDraft::from(body.into_inner());

    web::block(move || state.products.update_product(id, draft)).await??;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product id"),
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Caller is not admin or employee", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "products"
)]
pub async fn delete_product(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    user.require_any(CATALOGUE_EDITORS)?;
    let id = path.into_inner();

    web::block(move || state.products.delete_product(id)).await??;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    use crate::domain::user::Role;
    use crate::handlers::test_support::{bearer, memory_state, test_app};

    #[actix_web::test]
    async fn employee_can_create_and_anyone_can_read() {
        let state = memory_state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/products")
            .insert_header(bearer(1, Role::Employee))
            .set_json(json!({ "name": "Mug", "description": "Ceramic", "price": "12.50" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/products/{id}"))
            .to_request();
        let product: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(product["name"], "Mug");
        assert_eq!(product["price"], "12.50");

        let req = test::TestRequest::get().uri("/api/products").to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn customer_cannot_create_products() {
        let state = memory_state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/products")
            .insert_header(bearer(2, Role::Customer))
            .set_json(json!({ "name": "Mug", "price": "12.50" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn writes_without_token_are_unauthorized() {
        let state = memory_state();
        let app = test_app!(state);

        let req = test::TestRequest::delete().uri("/api/products/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "missing authorization header");
    }

    #[actix_web::test]
    async fn invalid_product_is_bad_request() {
        let state = memory_state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/products")
            .insert_header(bearer(1, Role::Admin))
            .set_json(json!({ "name": "", "price": "1.00" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn price_outside_currency_limits_is_bad_request() {
        let state = memory_state();
        let app = test_app!(state);

        for price in ["0.005", "12345678901.00"] {
            let req = test::TestRequest::post()
                .uri("/api/products")
                .insert_header(bearer(1, Role::Admin))
                .set_json(json!({ "name": "Mug", "price": price }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "price {price}");
        }
    }

    #[actix_web::test]
    async fn update_then_delete() {
        let state = memory_state();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri("/api/products")
            .insert_header(bearer(1, Role::Admin))
            .set_json(json!({ "name": "Mug", "price": "12.50" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/products/{id}"))
            .insert_header(bearer(1, Role::Admin))
            .set_json(json!({ "name": "Big mug", "price": "15.00" }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::delete()
            .uri(&format!("/api/products/{id}"))
            .insert_header(bearer(1, Role::Admin))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NO_CONTENT
        );

        let req = test::TestRequest::get()
            .uri(&format!("/api/products/{id}"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn non_numeric_id_is_bad_request() {
        let state = memory_state();
        let app = test_app!(state);

        let req = test::TestRequest::get().uri("/api/products/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}
