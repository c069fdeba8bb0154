use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::service::ServiceError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Maps service and validation failures to HTTP status codes and renders
/// them as `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// Path or body id is not a 24-character hex ObjectId
    InvalidId(String),
    /// Request body parsed but failed boundary validation
    InvalidRequest(String),
    KittenNotFound(ObjectId),
    ColorNotFound(ObjectId),
    /// Database operation error
    DatabaseError(anyhow::Error),
}

impl ApiError {
    /// Parse an ObjectId from user input
    pub fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
        ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidId(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid id: expected a 24-character hex ObjectId like '507f1f77bcf86cd799439011', got '{}'", id),
            ),
            ApiError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request: {}", msg),
            ),
            ApiError::KittenNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Kitten not found: {}", id),
            ),
            ApiError::ColorNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Color not found: {}", id),
            ),
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {}", err),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::KittenNotFound(id) => ApiError::KittenNotFound(id),
            ServiceError::ColorNotFound(id) => ApiError::ColorNotFound(id),
            ServiceError::Store(err) => ApiError::DatabaseError(err),
        }
    }
}
