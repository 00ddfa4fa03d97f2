pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod reconcile;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketing CMS API",
        version = "1.0.0",
        description = "Content management API for the marketing site, with asset upload and unused-asset cleanup"
    ),
    tags(
        (name = "Assets", description = "Asset upload and unused-asset reconciliation"),
        (name = "Gallery", description = "Gallery item management"),
        (name = "Products", description = "Product catalogue management"),
        (name = "About Us", description = "Company profile"),
        (name = "Brands", description = "Brand management"),
        (name = "News", description = "News and promotions"),
        (name = "Blogs", description = "Blog posts"),
        (name = "Categories", description = "Product categories"),
        (name = "Contact", description = "Contact details and social links"),
        (name = "Divisions", description = "Business divisions"),
        (name = "Home Content", description = "Home page sections"),
        (name = "Public", description = "Read-only endpoints for the public site"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes(&state.config))
        .split_for_parts();

    let cors = cors_layer(&state.config.server.cors);
    let uploads = ServeDir::new(&state.config.storage.upload_dir);

    router
        .with_state(state)
        .nest_service("/uploads", uploads)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age))
}
