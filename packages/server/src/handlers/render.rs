use axum::{
    body::Body,
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, Uri, header},
    response::Response,
};
use common::ImageRecord;
use common::store::RecordSource;
use tracing::{instrument, warn};

use crate::error::AppError;
use crate::render::{data_payload, render_markup};
use crate::state::AppState;

/// Serve the app shell for a work item, with its records pre-rendered and
/// embedded. The item arrives percent-decoded, so `/work/my%20set` looks up
/// `my set`.
#[instrument(skip(state, item))]
pub async fn render_work(
    State(state): State<AppState>,
    item: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    match item {
        Ok(Path(item)) => render(&state, Some(&item)).await,
        Err(rejection) => {
            warn!(error = %rejection, "Undecodable work item, rendering without data");
            render(&state, None).await
        }
    }
}

/// Serve the bare app shell for any path nothing else claims.
#[instrument(skip(state, uri), fields(path = %uri.path()))]
pub async fn render_page(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    render(&state, None).await
}

async fn render(state: &AppState, item: Option<&str>) -> Result<Response, AppError> {
    let records = match item {
        Some(item) => lookup(state.pages.as_ref(), item).await,
        None => None,
    };

    let markup = render_markup(item, records.as_deref());
    let data = data_payload(records.as_deref());
    let html = state.shell.render(&markup, &data);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
        .header(header::CACHE_CONTROL, state.config.render.cache_control())
        .body(Body::from(html))
        .map_err(|e| AppError::Internal(e.to_string()))
}

async fn lookup(source: &dyn RecordSource, item: &str) -> Option<Vec<ImageRecord>> {
    match source.lookup_by_category(item).await {
        Ok(records) => records,
        Err(e) => {
            warn!(item, error = %e, "Work item lookup failed, rendering without data");
            None
        }
    }
}
