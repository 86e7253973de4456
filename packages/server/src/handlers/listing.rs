use axum::{
    Json,
    extract::{Path, State},
};
use common::ImageRecord;
use tracing::{debug, instrument};

use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/{category}",
    tag = "Images",
    operation_id = "listImages",
    summary = "List the image records of a category",
    description = "Returns every record stored under the category folder, sorted by `order`. Records whose order is `-` come first. Unknown or empty categories return an empty array.",
    params(
        ("category" = String, Path, description = "Category folder name, e.g. `illustration`"),
    ),
    responses(
        (status = 200, description = "Records in listing order", body = Vec<ImageRecord>),
        (status = 500, description = "Record store failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_images(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<ImageRecord>>, AppError> {
    list_category(&state, &category).await
}

/// Same listing for paths with trailing segments; only the first one names
/// the category.
#[instrument(skip(state, path))]
pub async fn list_images_nested(
    State(state): State<AppState>,
    Path(path): Path<(String, String)>,
) -> Result<Json<Vec<ImageRecord>>, AppError> {
    let (category, _rest) = path;
    list_category(&state, &category).await
}

/// The API mount point without a category.
#[instrument]
pub async fn list_without_category() -> Json<Vec<ImageRecord>> {
    debug!("Listing requested without a category");
    Json(Vec::new())
}

async fn list_category(
    state: &AppState,
    category: &str,
) -> Result<Json<Vec<ImageRecord>>, AppError> {
    let records = state
        .store
        .lookup_by_category(category)
        .await?
        .unwrap_or_default();

    debug!(
        category,
        count = records.len(),
        unordered = records.iter().filter(|r| r.is_unordered()).count(),
        "Listed image records"
    );
    Ok(Json(records))
}
