pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;
pub mod state;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::credential_service::TokenSettings;
pub use config::Config;
pub use db::{create_pool, run_migrations, DbPool};
pub use state::AppState;

use crate::errors::AppError;
use crate::handlers::{auth, checkout, products, users};

/// Register the `/api` routes and the JSON/path extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .route("/auth/login", web::post().to(auth::login))
            .route("/auth/register", web::post().to(auth::register))
            .route("/checkout", web::post().to(checkout::checkout))
            .service(
                web::resource("/products")
                    .route(web::get().to(products::list_products))
                    .route(web::post().to(products::create_product)),
            )
            .service(
                web::resource("/products/{id}")
                    .route(web::get().to(products::get_product))
                    .route(web::put().to(products::update_product))
                    .route(web::delete().to(products::delete_product)),
            )
            .service(
                web::resource("/users")
                    .route(web::get().to(users::list_users))
                    .route(web::post().to(users::create_user)),
            )
            .service(
                web::resource("/users/{id}")
                    .route(web::get().to(users::get_user))
                    .route(web::put().to(users::update_user))
                    .route(web::delete().to(users::delete_user)),
            ),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: web::Data<AppState>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let api_doc = openapi::ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", api_doc.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
