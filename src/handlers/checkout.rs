use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ErrorResponse;
use crate::domain::cancel::CancelFlag;
use crate::domain::checkout::{CheckoutRequest, CustomerInfo, Order, PaymentMethod};
use crate::errors::AppError;
use crate::extractors::AuthenticatedUser;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CustomerBody {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutBody {
    /// Product ids in order; repeating an id charges it again.
    pub product_ids: Vec<i64>,
    pub payment_type: PaymentMethod,
    pub customer: CustomerBody,
}

impl From<CheckoutBody> for CheckoutRequest {
    fn from(body: CheckoutBody) -> Self {
        CheckoutRequest {
            product_ids: body.product_ids,
            payment_method: body.payment_type,
            customer: CustomerInfo {
                name: body.customer.name,
                email: body.customer.email,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[schema(value_type = String, example = "30.90")]
    pub total: BigDecimal,
    pub payment_type: PaymentMethod,
    pub customer: CustomerBody,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id,
            total: order.total,
            payment_type: order.payment_method,
            customer: CustomerBody {
                name: order.customer.name,
                email: order.customer.email,
            },
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/checkout
///
/// Prices the referenced products for the chosen payment method. Credit card
/// payments carry a 3% surcharge. Nothing is persisted.
#[utoipa::path(
    post,
    path = "/api/checkout",
    request_body = CheckoutBody,
    responses(
        (status = 200, description = "Order priced", body = OrderResponse),
        (status = 400, description = "Empty order or invalid customer", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "A referenced product does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "checkout"
)]
pub async fn checkout(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CheckoutBody>,
) -> Result<HttpResponse, AppError> {
    let request = CheckoutRequest::from(body.into_inner());

    // Dropped together with this future if the client disconnects.
    let cancel = CancelFlag::new();
    let _cancel_guard = cancel.cancel_on_drop();

    let order = web::block(move || state.checkout.process_order(request, &cancel)).await??;

    log::info!(
        "User {} checked out {} via {:?}",
        user.claims().user_id(),
        order.total,
        order.payment_method
    );
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
