use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, doc, DateTime as BsonDateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, IndexModel};
use serde::{Deserialize, Deserializer, Serialize};

use super::KittenStore;
use crate::db::Database;
use crate::kitten::{Color, Kitten, KittenFilter, KittenPatch, NewKitten};

const COLLECTION: &str = "kittens";

/// On-disk shape of a kitten document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KittenDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    age: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    colors: Vec<ColorDocument>,
    created_at: BsonDateTime,
    updated_at: BsonDateTime,
}

/// On-disk shape of an embedded color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColorDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    created_at: BsonDateTime,
    updated_at: BsonDateTime,
}

impl ColorDocument {
    fn new(name: String, now: BsonDateTime) -> Self {
        Self {
            id: ObjectId::new(),
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Treat an explicit BSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn to_chrono(dt: BsonDateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

impl From<ColorDocument> for Color {
    fn from(doc: ColorDocument) -> Self {
        Color {
            id: doc.id,
            name: doc.name,
            created_at: to_chrono(doc.created_at),
            updated_at: to_chrono(doc.updated_at),
        }
    }
}

impl From<KittenDocument> for Kitten {
    fn from(doc: KittenDocument) -> Self {
        Kitten {
            id: doc.id,
            name: doc.name,
            age: doc.age,
            colors: doc.colors.into_iter().map(Color::from).collect(),
            created_at: to_chrono(doc.created_at),
            updated_at: to_chrono(doc.updated_at),
        }
    }
}

/// Translate a filter into a MongoDB query document
///
/// Embedded colors are matched on `colors._id`, the identity field the
/// driver writes for sub-documents.
fn filter_document(filter: &KittenFilter) -> Document {
    let mut query = Document::new();
    if let Some(name) = &filter.name {
        query.insert("name", name.clone());
    }
    if let Some(color_id) = filter.color_id {
        query.insert("colors._id", color_id);
    }
    query
}

/// `$set` document for a partial update; always bumps `updatedAt`
fn patch_document(patch: KittenPatch, now: BsonDateTime) -> Document {
    let mut set = doc! { "updatedAt": now };
    if let Some(name) = patch.name {
        set.insert("name", name);
    }
    if let Some(age) = patch.age {
        set.insert("age", age);
    }
    set
}

/// MongoDB-backed kitten store
#[derive(Clone)]
pub struct MongoKittenStore {
    database: Database,
    collection: Collection<KittenDocument>,
}

impl MongoKittenStore {
    /// Bind to the `kittens` collection and make sure its indexes exist
    pub async fn new(database: Database) -> Result<Self> {
        let collection = database.db().collection::<KittenDocument>(COLLECTION);
        let store = Self {
            database,
            collection,
        };
        store.ensure_indexes().await?;
        Ok(store)
    }

    /// Create the index backing color lookups. Idempotent.
    async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder().keys(doc! { "colors._id": 1 }).build();
        let result = self
            .collection
            .create_index(index)
            .await
            .context("Failed to create index on colors._id")?;

        tracing::info!("Index ready on {}: {}", COLLECTION, result.index_name);
        Ok(())
    }
}

#[async_trait]
impl KittenStore for MongoKittenStore {
    async fn find(&self, filter: &KittenFilter) -> Result<Vec<Kitten>> {
        let mut cursor = self
            .collection
            .find(filter_document(filter))
            .sort(doc! { "_id": 1 })
            .await
            .context("Failed to query kittens")?;

        let mut kittens = Vec::new();
        while cursor.advance().await.context("Failed to read kitten cursor")? {
            let document = cursor
                .deserialize_current()
                .context("Failed to decode kitten document")?;
            kittens.push(Kitten::from(document));
        }

        tracing::debug!("Found {} kittens for filter {:?}", kittens.len(), filter);
        Ok(kittens)
    }

    async fn find_one(&self, filter: &KittenFilter) -> Result<Option<Kitten>> {
        let document = self
            .collection
            .find_one(filter_document(filter))
            .await
            .context("Failed to query kitten")?;

        Ok(document.map(Kitten::from))
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Kitten>> {
        let document = self
            .collection
            .find_one(doc! { "_id": id })
            .await
            .context("Failed to read kitten by id")?;

        if document.is_none() {
            tracing::debug!("Kitten not found with id: {}", id);
        }
        Ok(document.map(Kitten::from))
    }

    async fn save(&self, kitten: NewKitten) -> Result<Kitten> {
        let now = BsonDateTime::now();
        let document = KittenDocument {
            id: ObjectId::new(),
            name: kitten.name,
            age: kitten.age,
            colors: kitten
                .colors
                .into_iter()
                .map(|name| ColorDocument::new(name, now))
                .collect(),
            created_at: now,
            updated_at: now,
        };

        self.collection
            .insert_one(&document)
            .await
            .context("Failed to insert kitten")?;

        tracing::debug!("Inserted kitten with id: {}", document.id);
        Ok(Kitten::from(document))
    }

    async fn remove(&self, id: ObjectId) -> Result<Option<Kitten>> {
        let document = self
            .collection
            .find_one_and_delete(doc! { "_id": id })
            .await
            .context("Failed to delete kitten")?;

        Ok(document.map(Kitten::from))
    }

    async fn modify(&self, id: ObjectId, patch: KittenPatch) -> Result<Option<Kitten>> {
        let update = doc! { "$set": patch_document(patch, BsonDateTime::now()) };

        let previous = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::Before)
            .await
            .context("Failed to update kitten")?;

        Ok(previous.map(Kitten::from))
    }

    async fn push_colors(&self, id: ObjectId, names: Vec<String>) -> Result<Option<Kitten>> {
        let now = BsonDateTime::now();
        let colors = names
            .into_iter()
            .map(|name| bson::to_bson(&ColorDocument::new(name, now)))
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to encode colors")?;

        let update = doc! {
            "$push": { "colors": { "$each": colors } },
            "$set": { "updatedAt": now }
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await
            .context("Failed to append colors")?;

        Ok(updated.map(Kitten::from))
    }

    async fn pull_color(&self, id: ObjectId, color_id: ObjectId) -> Result<Option<Kitten>> {
        let update = doc! {
            "$pull": { "colors": { "_id": color_id } },
            "$set": { "updatedAt": BsonDateTime::now() }
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await
            .context("Failed to remove color")?;

        Ok(updated.map(Kitten::from))
    }

    async fn rename_color(
        &self,
        id: ObjectId,
        color_id: ObjectId,
        name: String,
    ) -> Result<Option<Kitten>> {
        let now = BsonDateTime::now();
        let update = doc! {
            "$set": {
                "colors.$.name": name,
                "colors.$.updatedAt": now,
                "updatedAt": now
            }
        };

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id, "colors._id": color_id }, update)
            .return_document(ReturnDocument::After)
            .await
            .context("Failed to rename color")?;

        Ok(updated.map(Kitten::from))
    }

    async fn ping(&self) -> Result<()> {
        self.database.ping().await
    }
}
