//! Data access for kitten documents.

mod mongo;
#[cfg(test)]
pub mod memory;

pub use mongo::MongoKittenStore;

use anyhow::Result;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::kitten::{Kitten, KittenFilter, KittenPatch, NewKitten};

/// Persistence port for kittens and their embedded colors
///
/// Every method maps to a single document-store operation. Color mutations are
/// expressed as atomic updates on the owning kitten, so concurrent writers
/// never overwrite each other's changes.
#[async_trait]
pub trait KittenStore: Send + Sync {
    /// All kittens matching `filter`, in creation order.
    async fn find(&self, filter: &KittenFilter) -> Result<Vec<Kitten>>;

    /// First kitten matching `filter`.
    async fn find_one(&self, filter: &KittenFilter) -> Result<Option<Kitten>>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Kitten>>;

    /// Persist a new kitten, assigning its identity and timestamps.
    async fn save(&self, kitten: NewKitten) -> Result<Kitten>;

    /// Delete a kitten, returning it as it was before deletion.
    async fn remove(&self, id: ObjectId) -> Result<Option<Kitten>>;

    /// Apply a partial update, returning the document as it was **before**
    /// the update.
    async fn modify(&self, id: ObjectId, patch: KittenPatch) -> Result<Option<Kitten>>;

    /// Append one color per name; returns the updated kitten.
    async fn push_colors(&self, id: ObjectId, names: Vec<String>) -> Result<Option<Kitten>>;

    /// Remove a color if present. The kitten is written either way; `None`
    /// only when the kitten itself is absent.
    async fn pull_color(&self, id: ObjectId, color_id: ObjectId) -> Result<Option<Kitten>>;

    /// Rename a color; `None` when either the kitten or the color is absent.
    async fn rename_color(
        &self,
        id: ObjectId,
        color_id: ObjectId,
        name: String,
    ) -> Result<Option<Kitten>>;

    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> Result<()>;
}
