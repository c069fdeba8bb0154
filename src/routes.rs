use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

// Route path constants - single source of truth for all API paths
pub const HEALTH: &str = "/health";
pub const KITTENS: &str = "/api/v1/kittens";
pub const KITTEN_ITEM: &str = "/api/v1/kittens/{id}";
pub const KITTEN_COLOR: &str = "/api/v1/kittens/color";
pub const KITTEN_COLORS: &str = "/api/v1/kittens/colors";
pub const KITTEN_COLOR_ITEM: &str = "/api/v1/kittens/color/{id}";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the application router with every route, the OpenAPI docs, and
/// request tracing
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH, get(handlers::health_handler))
        .route(
            KITTENS,
            get(handlers::list_handler).post(handlers::create_handler),
        )
        .route(
            KITTEN_COLOR,
            post(handlers::add_color_handler).delete(handlers::remove_color_handler),
        )
        .route(KITTEN_COLORS, post(handlers::add_colors_handler))
        .route(
            KITTEN_COLOR_ITEM,
            put(handlers::modify_color_handler).get(handlers::color_detail_handler),
        )
        .route(
            KITTEN_ITEM,
            get(handlers::get_handler)
                .put(handlers::update_handler)
                .delete(handlers::remove_handler),
        )
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
