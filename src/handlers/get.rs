use crate::error::{ApiError, ErrorResponse};
use crate::models::KittenResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /api/v1/kittens/{id} handler - Retrieve one kitten
#[utoipa::path(
    get,
    path = routes::KITTEN_ITEM,
    params(
        ("id" = String, Path, description = "Kitten id (24-character hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Kitten found", body = KittenResponse),
        (status = 400, description = "Invalid id format", body = ErrorResponse),
        (status = 404, description = "Kitten not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "kittens"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<KittenResponse>), ApiError> {
    let id = ApiError::parse_id(&id_str)?;

    match state.service.get_one(id).await {
        Ok(kitten) => {
            tracing::info!("Retrieved kitten with id: {}", id);
            Ok((StatusCode::OK, Json(KittenResponse::from(kitten))))
        }
        Err(e) => {
            tracing::info!("Kitten lookup failed for id {}: {}", id, e);
            Err(e.into())
        }
    }
}
