//! Handlers for the colors embedded in a kitten.

use crate::error::{ApiError, ErrorResponse};
use crate::models::{
    AddColorRequest, AddColorsRequest, ColorResponse, KittenResponse, ModifyColorRequest,
    RemoveColorRequest,
};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// POST /api/v1/kittens/color handler - Record a new color on a kitten
#[utoipa::path(
    post,
    path = routes::KITTEN_COLOR,
    request_body = AddColorRequest,
    responses(
        (status = 200, description = "Color appended; body is the updated kitten", body = KittenResponse),
        (status = 400, description = "Invalid id or request body", body = ErrorResponse),
        (status = 404, description = "Kitten not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "colors"
)]
pub async fn add_color_handler(
    State(state): State<AppState>,
    Json(request): Json<AddColorRequest>,
) -> Result<(StatusCode, Json<KittenResponse>), ApiError> {
    let (id, color) = request.validate()?;

    let kitten = state.service.set_color(id, color).await?;

    tracing::info!("Added color to kitten {} ({} colors)", id, kitten.colors.len());
    Ok((StatusCode::OK, Json(KittenResponse::from(kitten))))
}

/// POST /api/v1/kittens/colors handler - Record several colors at once
#[utoipa::path(
    post,
    path = routes::KITTEN_COLORS,
    request_body = AddColorsRequest,
    responses(
        (status = 200, description = "Colors appended in order; body is the updated kitten", body = KittenResponse),
        (status = 400, description = "Invalid id or request body", body = ErrorResponse),
        (status = 404, description = "Kitten not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "colors"
)]
pub async fn add_colors_handler(
    State(state): State<AppState>,
    Json(request): Json<AddColorsRequest>,
) -> Result<(StatusCode, Json<KittenResponse>), ApiError> {
    let (id, colors) = request.validate()?;
    let added = colors.len();

    let kitten = state.service.set_colors(id, colors).await?;

    tracing::info!("Added {} colors to kitten {}", added, id);
    Ok((StatusCode::OK, Json(KittenResponse::from(kitten))))
}

/// DELETE /api/v1/kittens/color handler - A color washed off
///
/// Removing a color the kitten does not have is not an error; the kitten is
/// still written and returned.
#[utoipa::path(
    delete,
    path = routes::KITTEN_COLOR,
    request_body = RemoveColorRequest,
    responses(
        (status = 200, description = "Color removed; body is the updated kitten", body = KittenResponse),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Kitten not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "colors"
)]
pub async fn remove_color_handler(
    State(state): State<AppState>,
    Json(request): Json<RemoveColorRequest>,
) -> Result<(StatusCode, Json<KittenResponse>), ApiError> {
    let (id, color_id) = request.validate()?;

    let kitten = state.service.remove_color(id, color_id).await?;

    tracing::info!("Removed color {} from kitten {}", color_id, id);
    Ok((StatusCode::OK, Json(KittenResponse::from(kitten))))
}

/// PUT /api/v1/kittens/color/{id} handler - Rename a color
///
/// The path id is the kitten; the body carries the color id and its new name.
#[utoipa::path(
    put,
    path = routes::KITTEN_COLOR_ITEM,
    params(
        ("id" = String, Path, description = "Kitten id (24-character hex ObjectId)")
    ),
    request_body = ModifyColorRequest,
    responses(
        (status = 200, description = "Color renamed; body is the updated kitten", body = KittenResponse),
        (status = 400, description = "Invalid id or request body", body = ErrorResponse),
        (status = 404, description = "Kitten or color not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "colors"
)]
pub async fn modify_color_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(request): Json<ModifyColorRequest>,
) -> Result<(StatusCode, Json<KittenResponse>), ApiError> {
    let id = ApiError::parse_id(&id_str)?;
    let (color_id, name) = request.validate()?;

    let kitten = state.service.modify_color(id, color_id, name).await?;

    tracing::info!("Renamed color {} on kitten {}", color_id, id);
    Ok((StatusCode::OK, Json(KittenResponse::from(kitten))))
}

/// GET /api/v1/kittens/color/{id} handler - Look up a color by its own id
#[utoipa::path(
    get,
    path = routes::KITTEN_COLOR_ITEM,
    params(
        ("id" = String, Path, description = "Color id (24-character hex ObjectId)")
    ),
    responses(
        (status = 200, description = "Color found", body = ColorResponse),
        (status = 400, description = "Invalid id format", body = ErrorResponse),
        (status = 404, description = "Color not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "colors"
)]
pub async fn color_detail_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<ColorResponse>), ApiError> {
    let color_id = ApiError::parse_id(&id_str)?;

    let color = state.service.color_detail(color_id).await?;

    Ok((StatusCode::OK, Json(ColorResponse::from(color))))
}
