use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::Router;
use axum::routing::get;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::CorsConfig;
use crate::handlers;
use crate::state::AppState;

/// Public, read-only listing API. The first segment after the mount point is
/// the category; anything after it is ignored.
pub fn image_routes(cors: &CorsConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::listing::list_images))
        .route(
            "/{category}/{*rest}",
            get(handlers::listing::list_images_nested),
        )
        .layer(cors_layer(cors))
}

/// The mount point itself, with or without a trailing slash. No category is
/// named, so the listing is always empty.
pub fn bare_image_routes(prefix: &str, cors: &CorsConfig) -> Router<AppState> {
    let empty = get(handlers::listing::list_without_category);
    Router::new()
        .route(prefix, empty.clone())
        .route(&format!("{prefix}/"), empty)
        .layer(cors_layer(cors))
}

/// Any origin may read unless `server.cors.allow_origins` narrows it.
fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origin = if cors.allow_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(cors.allow_origins.iter().filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .inspect_err(|_| warn!(origin = %origin, "Ignoring invalid CORS origin"))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .max_age(Duration::from_secs(cors.max_age))
}
