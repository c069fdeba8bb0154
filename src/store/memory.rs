//! In-process `KittenStore` used by service and handler tests.

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::KittenStore;
use crate::kitten::{Color, Kitten, KittenFilter, KittenPatch, NewKitten};

/// Kittens keyed by id. ObjectIds sort by creation time, so map order
/// matches the creation order the MongoDB store returns.
#[derive(Default)]
pub struct MemoryKittenStore {
    kittens: RwLock<BTreeMap<ObjectId, Kitten>>,
}

impl MemoryKittenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(filter: &KittenFilter, kitten: &Kitten) -> bool {
    let name_ok = filter.name.as_ref().is_none_or(|name| &kitten.name == name);
    let color_ok = filter
        .color_id
        .is_none_or(|color_id| kitten.color(color_id).is_some());
    name_ok && color_ok
}

#[async_trait]
impl KittenStore for MemoryKittenStore {
    async fn find(&self, filter: &KittenFilter) -> Result<Vec<Kitten>> {
        let kittens = self.kittens.read().await;
        Ok(kittens.values().filter(|k| matches(filter, k)).cloned().collect())
    }

    async fn find_one(&self, filter: &KittenFilter) -> Result<Option<Kitten>> {
        let kittens = self.kittens.read().await;
        Ok(kittens.values().find(|k| matches(filter, k)).cloned())
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Kitten>> {
        Ok(self.kittens.read().await.get(&id).cloned())
    }

    async fn save(&self, kitten: NewKitten) -> Result<Kitten> {
        let now = Utc::now();
        let kitten = Kitten {
            id: ObjectId::new(),
            name: kitten.name,
            age: kitten.age,
            colors: kitten.colors.into_iter().map(|n| Color::new(n, now)).collect(),
            created_at: now,
            updated_at: now,
        };
        self.kittens.write().await.insert(kitten.id, kitten.clone());
        Ok(kitten)
    }

    async fn remove(&self, id: ObjectId) -> Result<Option<Kitten>> {
        Ok(self.kittens.write().await.remove(&id))
    }

    async fn modify(&self, id: ObjectId, patch: KittenPatch) -> Result<Option<Kitten>> {
        let mut kittens = self.kittens.write().await;
        let Some(kitten) = kittens.get_mut(&id) else {
            return Ok(None);
        };

        let previous = kitten.clone();
        if let Some(name) = patch.name {
            kitten.name = name;
        }
        if let Some(age) = patch.age {
            kitten.age = Some(age);
        }
        kitten.updated_at = Utc::now();
        Ok(Some(previous))
    }

    async fn push_colors(&self, id: ObjectId, names: Vec<String>) -> Result<Option<Kitten>> {
        let mut kittens = self.kittens.write().await;
        let Some(kitten) = kittens.get_mut(&id) else {
            return Ok(None);
        };

        let now = Utc::now();
        kitten.colors.extend(names.into_iter().map(|n| Color::new(n, now)));
        kitten.updated_at = now;
        Ok(Some(kitten.clone()))
    }

    async fn pull_color(&self, id: ObjectId, color_id: ObjectId) -> Result<Option<Kitten>> {
        let mut kittens = self.kittens.write().await;
        let Some(kitten) = kittens.get_mut(&id) else {
            return Ok(None);
        };

        kitten.colors.retain(|c| c.id != color_id);
        kitten.updated_at = Utc::now();
        Ok(Some(kitten.clone()))
    }

    async fn rename_color(
        &self,
        id: ObjectId,
        color_id: ObjectId,
        name: String,
    ) -> Result<Option<Kitten>> {
        let mut kittens = self.kittens.write().await;
        let Some(kitten) = kittens.get_mut(&id) else {
            return Ok(None);
        };
        let Some(color) = kitten.colors.iter_mut().find(|c| c.id == color_id) else {
            return Ok(None);
        };

        let now = Utc::now();
        color.name = name;
        color.updated_at = now;
        kitten.updated_at = now;
        Ok(Some(kitten.clone()))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_kitten(name: &str, colors: &[&str]) -> NewKitten {
        NewKitten {
            name: name.to_string(),
            age: None,
            colors: colors.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_find_filters_by_name_and_color() {
        let store = MemoryKittenStore::new();
        let tom = store.save(new_kitten("tom", &["gray"])).await.unwrap();
        store.save(new_kitten("felix", &[])).await.unwrap();

        assert_eq!(store.find(&KittenFilter::all()).await.unwrap().len(), 2);

        let by_color = store
            .find(&KittenFilter::with_color(tom.colors[0].id))
            .await
            .unwrap();
        assert_eq!(by_color, vec![tom.clone()]);

        let by_name = KittenFilter {
            name: Some("felix".to_string()),
            ..KittenFilter::default()
        };
        let felix = store.find_one(&by_name).await.unwrap().unwrap();
        assert_eq!(felix.name, "felix");

        let nobody = KittenFilter {
            name: Some("tom".to_string()),
            color_id: Some(ObjectId::new()),
        };
        assert!(store.find_one(&nobody).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_kitten_yields_none() {
        let store = MemoryKittenStore::new();
        let id = ObjectId::new();

        assert!(store.find_by_id(id).await.unwrap().is_none());
        assert!(store.remove(id).await.unwrap().is_none());
        assert!(store.modify(id, KittenPatch::default()).await.unwrap().is_none());
        assert!(store.push_colors(id, vec!["gray".into()]).await.unwrap().is_none());
        assert!(store.pull_color(id, ObjectId::new()).await.unwrap().is_none());
        assert!(store
            .rename_color(id, ObjectId::new(), "black".into())
            .await
            .unwrap()
            .is_none());
    }
}
