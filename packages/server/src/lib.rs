pub mod config;
pub mod consumers;
pub mod database;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod utils;

use axum::routing::get;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

/// Mount point of the listing API.
pub const IMAGES_PREFIX: &str = "/api/images";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio API",
        version = "1.0.0",
        description = "Image records for the portfolio site, grouped by category folder"
    ),
    tags(
        (name = "Images", description = "Image records by category"),
    ),
)]
struct ApiDoc;

/// Build the application router.
///
/// Paths outside the API fall through to the page renderer.
pub fn build_router(state: AppState) -> axum::Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest(IMAGES_PREFIX, routes::image_routes(&state.config.server.cors))
        .split_for_parts();

    router
        .merge(routes::bare_image_routes(IMAGES_PREFIX, &state.config.server.cors))
        .route("/healthz", get(handlers::health::healthz))
        .route("/work/{item}", get(handlers::render::render_work))
        .fallback(handlers::render::render_page)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
}
