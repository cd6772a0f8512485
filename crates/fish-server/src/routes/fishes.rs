//! Fish catalog routes.
//!
//! - GET /fishes - List every fish
//! - POST /fishes - Create a fish from a JSON body
//! - GET /fishes/random - Redirect to a randomly chosen fish
//! - GET /fishes/{id} - Fetch one fish
//!
//! Every other method on `/fishes` is answered with 405, HEAD included, and
//! any other shape of path under `/fishes/` with 404.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::get,
};
use fish_store::Fish;

use crate::error::{ApiError, ApiResult};
use crate::routes::path::{FishPath, item_path};
use crate::state::AppState;

/// The only content type accepted for new fish.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// GET /fishes - Snapshot of every stored fish, in no particular order.
async fn list_fishes(State(state): State<AppState>) -> Json<Vec<Fish>> {
    let fishes = state.store().list_all();
    tracing::debug!(count = fishes.len(), "Listed fishes");
    Json(fishes)
}

/// POST /fishes - Create a fish.
///
/// The content type is checked before the body is looked at, and a body that
/// fails to decode is rejected without touching the store. A body that cannot
/// be read is a 500, except one over the body size limit, which is a 413.
async fn create_fish(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<Fish>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();
    if content_type != JSON_CONTENT_TYPE {
        return Err(ApiError::UnsupportedMediaType(format!(
            "need content-type '{JSON_CONTENT_TYPE}' but got '{content_type}'"
        )));
    }

    let body = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::warn!(error = %e, "Request body over the size limit");
            return ApiError::PayloadTooLarge(e.body_text());
        }
        tracing::error!(error = %e, "Failed to read request body");
        ApiError::Internal(e.body_text())
    })?;

    let candidate: Fish =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let fish = state.store().insert(candidate);
    tracing::info!(id = %fish.id, name = ?fish.name, "Created fish");

    Ok(Json(fish))
}

/// GET /fishes/{...} - Dispatch a single-item path.
async fn fish_item(State(state): State<AppState>, uri: Uri) -> ApiResult<Response> {
    match FishPath::parse(uri.path()) {
        Some(FishPath::Random) => random_fish(&state),
        Some(FishPath::ById(id)) => get_fish(&state, &id).map(IntoResponse::into_response),
        None => Err(ApiError::NotFound(format!("no fish at {}", uri.path()))),
    }
}

/// Redirect to a uniformly chosen fish.
fn random_fish(state: &AppState) -> ApiResult<Response> {
    let id = state.store().pick_random()?;
    tracing::debug!(id = %id, "Picked random fish");

    Ok((StatusCode::FOUND, [(header::LOCATION, item_path(&id))]).into_response())
}

/// Fetch one fish by identifier.
fn get_fish(state: &AppState, id: &str) -> ApiResult<Json<Fish>> {
    let fish = state.store().get(id)?;
    Ok(Json(fish))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Build fish routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/fishes",
            get(list_fishes)
                .post(create_fish)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .route(
            "/fishes/{*rest}",
            get(fish_item)
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
}
