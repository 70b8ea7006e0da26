pub mod auth;
pub mod checkout;
pub mod products;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
pub(crate) mod test_support {
    use actix_web::web;
    use chrono::Duration;

    use crate::application::credential_service::{issue_token, TokenSettings};
    use crate::domain::user::Role;
    use crate::state::AppState;

    pub(crate) const SECRET: &str = "handler-test-secret";

    pub(crate) fn memory_state() -> web::Data<AppState> {
        web::Data::new(AppState::in_memory(TokenSettings {
            secret: SECRET.to_string(),
            ttl: Duration::hours(1),
        }))
    }

    pub(crate) fn bearer(user_id: i64, role: Role) -> (&'static str, String) {
        let token = issue_token(user_id, role, SECRET, Duration::hours(1)).expect("token");
        ("Authorization", format!("Bearer {token}"))
    }

    macro_rules! test_app {
        ($state:expr) => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .app_data($state.clone())
                    .configure(crate::configure),
            )
            .await
        };
    }

    pub(crate) use test_app;
}
