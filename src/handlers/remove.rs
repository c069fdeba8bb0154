use crate::error::{ApiError, ErrorResponse};
use crate::models::KittenResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// DELETE /api/v1/kittens/{id} handler - A kitten got adopted
///
/// Responds with the removed kitten.
#[utoipa::path(
    delete,
    path = routes::KITTEN_ITEM,
    params(
        ("id" = String, Path, description = "Kitten id (24-character hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Kitten removed", body = KittenResponse),
        (status = 400, description = "Invalid id format", body = ErrorResponse),
        (status = 404, description = "Kitten not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "kittens"
)]
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<KittenResponse>), ApiError> {
    let id = ApiError::parse_id(&id_str)?;

    let removed = state.service.remove(id).await?;

    tracing::info!("Removed kitten with id: {}", id);
    Ok((StatusCode::OK, Json(KittenResponse::from(removed))))
}
