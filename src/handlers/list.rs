use crate::error::{ApiError, ErrorResponse};
use crate::kitten::KittenFilter;
use crate::models::{KittenResponse, ListQuery};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Query, extract::State, http::StatusCode, Json};

/// GET /api/v1/kittens handler - List kittens
///
/// Returns every kitten in creation order. There is no pagination.
/// Query parameters:
/// - name: only return kittens with exactly this name (optional)
#[utoipa::path(
    get,
    path = routes::KITTENS,
    params(
        ("name" = Option<String>, Query, description = "Only return kittens with exactly this name")
    ),
    responses(
        (status = 200, description = "List of kittens", body = Vec<KittenResponse>),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "kittens"
)]
pub async fn list_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<(StatusCode, Json<Vec<KittenResponse>>), ApiError> {
    let kittens = match query.name {
        Some(name) => {
            let filter = KittenFilter {
                name: Some(name),
                ..KittenFilter::default()
            };
            state.service.list(&filter).await?
        }
        None => state.service.list_all().await?,
    };

    tracing::info!("Listed {} kittens", kittens.len());

    let data = kittens.into_iter().map(KittenResponse::from).collect();
    Ok((StatusCode::OK, Json(data)))
}
