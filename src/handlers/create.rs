use crate::error::{ApiError, ErrorResponse};
use crate::models::{CreateKittenRequest, KittenResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /api/v1/kittens handler - Create a kitten
#[utoipa::path(
    post,
    path = routes::KITTENS,
    request_body = CreateKittenRequest,
    responses(
        (status = 200, description = "Kitten created", body = KittenResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "kittens"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateKittenRequest>,
) -> Result<(StatusCode, Json<KittenResponse>), ApiError> {
    let new_kitten = request.validate()?;

    let kitten = state.service.save(new_kitten).await?;

    tracing::info!("Created kitten with id: {}", kitten.id);
    Ok((StatusCode::OK, Json(KittenResponse::from(kitten))))
}
