use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{
    AddColorRequest, AddColorsRequest, ColorNameRequest, ColorResponse, CreateKittenRequest,
    KittenResponse, ModifyColorRequest, RemoveColorRequest, UpdateKittenRequest,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "kitten-service API",
        version = "1.0.0",
        description = "Kittens and their coat colors, backed by MongoDB"
    ),
    paths(
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::get::get_handler,
        handlers::create::create_handler,
        handlers::update::update_handler,
        handlers::remove::remove_handler,
        handlers::color::add_color_handler,
        handlers::color::add_colors_handler,
        handlers::color::remove_color_handler,
        handlers::color::modify_color_handler,
        handlers::color::color_detail_handler
    ),
    components(
        schemas(
            KittenResponse,
            ColorResponse,
            CreateKittenRequest,
            ColorNameRequest,
            UpdateKittenRequest,
            AddColorRequest,
            AddColorsRequest,
            RemoveColorRequest,
            ModifyColorRequest,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "kittens", description = "Kitten records"),
        (name = "colors", description = "Colors embedded in a kitten")
    )
)]
pub struct ApiDoc;
