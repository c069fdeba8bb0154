use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

/// A kitten record as stored in the `kittens` collection
#[derive(Debug, Clone, PartialEq)]
pub struct Kitten {
    pub id: ObjectId,
    pub name: String,
    pub age: Option<f64>,
    pub colors: Vec<Color>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Kitten {
    /// Look up an embedded color by its identity
    pub fn color(&self, color_id: ObjectId) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == color_id)
    }
}

/// A color embedded in a kitten; never stored on its own
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    pub id: ObjectId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
impl Color {
    /// Build a fresh color stamped with `now`
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a kitten. Identity and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewKitten {
    pub name: String,
    pub age: Option<f64>,
    pub colors: Vec<String>,
}

/// Partial update of a kitten's scalar fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KittenPatch {
    pub name: Option<String>,
    pub age: Option<f64>,
}

/// Query over the kitten collection. The default value matches every kitten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KittenFilter {
    pub name: Option<String>,
    pub color_id: Option<ObjectId>,
}

impl KittenFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches the kitten owning the embedded color `color_id`
    pub fn with_color(color_id: ObjectId) -> Self {
        Self {
            color_id: Some(color_id),
            ..Self::default()
        }
    }
}
