use crate::error::{ApiError, ErrorResponse};
use crate::models::{KittenResponse, UpdateKittenRequest};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// PUT /api/v1/kittens/{id} handler - Update a kitten's name and/or age
///
/// Responds with the kitten as it was **before** the update was applied.
#[utoipa::path(
    put,
    path = routes::KITTEN_ITEM,
    params(
        ("id" = String, Path, description = "Kitten id (24-character hex ObjectId)")
    ),
    request_body = UpdateKittenRequest,
    responses(
        (status = 200, description = "Kitten updated; body is the pre-update document", body = KittenResponse),
        (status = 400, description = "Invalid id or request body", body = ErrorResponse),
        (status = 404, description = "Kitten not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "kittens"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(request): Json<UpdateKittenRequest>,
) -> Result<(StatusCode, Json<KittenResponse>), ApiError> {
    let id = ApiError::parse_id(&id_str)?;
    let patch = request.validate()?;

    let previous = state.service.modify(id, patch).await?;

    tracing::info!("Updated kitten with id: {}", id);
    Ok((StatusCode::OK, Json(KittenResponse::from(previous))))
}
