use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::kitten::{Color, Kitten, KittenPatch, NewKitten};

fn timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A kitten as returned by every kitten endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KittenResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub age: Option<f64>,
    pub colors: Vec<ColorResponse>,
    pub created_at: String,
    pub updated_at: String,
}

/// An embedded color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColorResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Color> for ColorResponse {
    fn from(color: Color) -> Self {
        ColorResponse {
            id: color.id.to_hex(),
            name: color.name,
            created_at: timestamp(color.created_at),
            updated_at: timestamp(color.updated_at),
        }
    }
}

impl From<Kitten> for KittenResponse {
    fn from(kitten: Kitten) -> Self {
        KittenResponse {
            id: kitten.id.to_hex(),
            name: kitten.name,
            age: kitten.age,
            colors: kitten.colors.into_iter().map(ColorResponse::from).collect(),
            created_at: timestamp(kitten.created_at),
            updated_at: timestamp(kitten.updated_at),
        }
    }
}

/// Query parameters for the list endpoint
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct ListQuery {
    pub name: Option<String>,
}

/// Color name in a create request
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ColorNameRequest {
    pub name: String,
}

/// Body of `POST /api/v1/kittens`
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateKittenRequest {
    pub name: String,
    pub age: Option<f64>,
    #[serde(default)]
    pub colors: Vec<ColorNameRequest>,
}

/// Body of `PUT /api/v1/kittens/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateKittenRequest {
    pub name: Option<String>,
    pub age: Option<f64>,
}

/// Body of `POST /api/v1/kittens/color`
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AddColorRequest {
    /// Kitten id
    pub id: String,
    /// New color name
    pub color: String,
}

/// Body of `POST /api/v1/kittens/colors`
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct AddColorsRequest {
    /// Kitten id
    pub id: String,
    pub colors: Vec<String>,
}

/// Body of `DELETE /api/v1/kittens/color`
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RemoveColorRequest {
    /// Kitten id
    pub id: String,
    #[serde(rename = "colorId")]
    pub color_id: String,
}

/// Body of `PUT /api/v1/kittens/color/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ModifyColorRequest {
    /// Color id
    pub id: String,
    pub name: String,
}

fn require_name(field: &str, value: String) -> Result<String, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidRequest(format!("{} must not be empty", field)));
    }
    Ok(value)
}

fn check_age(age: Option<f64>) -> Result<Option<f64>, ApiError> {
    match age {
        Some(a) if !a.is_finite() || a < 0.0 => Err(ApiError::InvalidRequest(format!(
            "age must be a non-negative number, got {}",
            a
        ))),
        _ => Ok(age),
    }
}

impl CreateKittenRequest {
    pub fn validate(self) -> Result<NewKitten, ApiError> {
        let colors = self
            .colors
            .into_iter()
            .map(|c| require_name("color name", c.name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewKitten {
            name: require_name("name", self.name)?,
            age: check_age(self.age)?,
            colors,
        })
    }
}

impl UpdateKittenRequest {
    pub fn validate(self) -> Result<KittenPatch, ApiError> {
        Ok(KittenPatch {
            name: self.name.map(|n| require_name("name", n)).transpose()?,
            age: check_age(self.age)?,
        })
    }
}

impl AddColorRequest {
    pub fn validate(self) -> Result<(ObjectId, String), ApiError> {
        Ok((ApiError::parse_id(&self.id)?, require_name("color", self.color)?))
    }
}

impl AddColorsRequest {
    pub fn validate(self) -> Result<(ObjectId, Vec<String>), ApiError> {
        let id = ApiError::parse_id(&self.id)?;
        if self.colors.is_empty() {
            return Err(ApiError::InvalidRequest("colors must not be empty".to_string()));
        }
        let colors = self
            .colors
            .into_iter()
            .map(|c| require_name("color", c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((id, colors))
    }
}

impl RemoveColorRequest {
    pub fn validate(self) -> Result<(ObjectId, ObjectId), ApiError> {
        Ok((ApiError::parse_id(&self.id)?, ApiError::parse_id(&self.color_id)?))
    }
}

impl ModifyColorRequest {
    pub fn validate(self) -> Result<(ObjectId, String), ApiError> {
        Ok((ApiError::parse_id(&self.id)?, require_name("name", self.name)?))
    }
}
