use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::kitten::{Color, Kitten, KittenFilter, KittenPatch, NewKitten};
use crate::store::KittenStore;

/// Errors surfaced by [`KittenService`]
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("kitten not found: {0}")]
    KittenNotFound(ObjectId),
    #[error("color not found: {0}")]
    ColorNotFound(ObjectId),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Kitten use cases on top of a [`KittenStore`]
#[derive(Clone)]
pub struct KittenService {
    store: Arc<dyn KittenStore>,
}

impl KittenService {
    pub fn new(store: Arc<dyn KittenStore>) -> Self {
        Self { store }
    }

    /// Every kitten, in creation order
    pub async fn list_all(&self) -> ServiceResult<Vec<Kitten>> {
        Ok(self.store.find(&KittenFilter::all()).await?)
    }

    /// Kittens matching `filter`
    pub async fn list(&self, filter: &KittenFilter) -> ServiceResult<Vec<Kitten>> {
        Ok(self.store.find(filter).await?)
    }

    pub async fn get_one(&self, id: ObjectId) -> ServiceResult<Kitten> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::KittenNotFound(id))
    }

    pub async fn save(&self, kitten: NewKitten) -> ServiceResult<Kitten> {
        Ok(self.store.save(kitten).await?)
    }

    /// Apply `patch` and return the kitten as it was before the update
    pub async fn modify(&self, id: ObjectId, patch: KittenPatch) -> ServiceResult<Kitten> {
        self.store
            .modify(id, patch)
            .await?
            .ok_or(ServiceError::KittenNotFound(id))
    }

    /// Delete a kitten and return the removed record
    pub async fn remove(&self, id: ObjectId) -> ServiceResult<Kitten> {
        self.store
            .remove(id)
            .await?
            .ok_or(ServiceError::KittenNotFound(id))
    }

    /// Record a newly observed color on a kitten
    pub async fn set_color(&self, id: ObjectId, color: String) -> ServiceResult<Kitten> {
        self.set_colors(id, vec![color]).await
    }

    /// Record several colors at once, in the given order
    pub async fn set_colors(&self, id: ObjectId, colors: Vec<String>) -> ServiceResult<Kitten> {
        self.store
            .push_colors(id, colors)
            .await?
            .ok_or(ServiceError::KittenNotFound(id))
    }

    /// Drop a color from a kitten. An unknown `color_id` is not an error; the
    /// kitten is still written and returned unchanged apart from `updated_at`.
    pub async fn remove_color(&self, id: ObjectId, color_id: ObjectId) -> ServiceResult<Kitten> {
        self.store
            .pull_color(id, color_id)
            .await?
            .ok_or(ServiceError::KittenNotFound(id))
    }

    /// Rename one of a kitten's colors
    pub async fn modify_color(
        &self,
        id: ObjectId,
        color_id: ObjectId,
        name: String,
    ) -> ServiceResult<Kitten> {
        if let Some(kitten) = self.store.rename_color(id, color_id, name).await? {
            return Ok(kitten);
        }

        // The store cannot tell which half of the match failed.
        match self.store.find_by_id(id).await? {
            Some(_) => Err(ServiceError::ColorNotFound(color_id)),
            None => Err(ServiceError::KittenNotFound(id)),
        }
    }

    /// Find a color by its identity, whichever kitten owns it
    pub async fn color_detail(&self, color_id: ObjectId) -> ServiceResult<Color> {
        self.store
            .find_one(&KittenFilter::with_color(color_id))
            .await?
            .and_then(|kitten| kitten.color(color_id).cloned())
            .ok_or(ServiceError::ColorNotFound(color_id))
    }

    pub async fn health_check(&self) -> ServiceResult<()> {
        Ok(self.store.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryKittenStore;

    fn service() -> KittenService {
        KittenService::new(Arc::new(MemoryKittenStore::new()))
    }

    fn new_kitten(name: &str) -> NewKitten {
        NewKitten {
            name: name.to_string(),
            age: Some(2.0),
            colors: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_save_then_get_one() {
        let service = service();

        let saved = service.save(new_kitten("tom")).await.unwrap();
        let found = service.get_one(saved.id).await.unwrap();

        assert_eq!(found, saved);
        assert_eq!(found.name, "tom");
        assert_eq!(found.age, Some(2.0));
        assert!(found.colors.is_empty());
        assert_eq!(found.created_at, found.updated_at);
    }

    #[tokio::test]
    async fn test_get_one_unknown_id() {
        let service = service();
        let id = ObjectId::new();

        let err = service.get_one(id).await.unwrap_err();
        assert!(matches!(err, ServiceError::KittenNotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_list_all_returns_every_kitten() {
        let service = service();
        let tom = service.save(new_kitten("tom")).await.unwrap();
        let felix = service.save(new_kitten("felix")).await.unwrap();

        let all = service.list_all().await.unwrap();
        let ids: Vec<_> = all.iter().map(|k| k.id).collect();

        assert_eq!(ids, vec![tom.id, felix.id]);
    }

    #[tokio::test]
    async fn test_list_by_name() {
        let service = service();
        service.save(new_kitten("tom")).await.unwrap();
        let felix = service.save(new_kitten("felix")).await.unwrap();

        let filter = KittenFilter {
            name: Some("felix".to_string()),
            ..KittenFilter::default()
        };
        let found = service.list(&filter).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, felix.id);
    }

    #[tokio::test]
    async fn test_modify_returns_previous_state() {
        let service = service();
        let saved = service.save(new_kitten("tom")).await.unwrap();

        let previous = service
            .modify(
                saved.id,
                KittenPatch {
                    name: None,
                    age: Some(3.0),
                },
            )
            .await
            .unwrap();
        assert_eq!(previous.age, Some(2.0));

        let current = service.get_one(saved.id).await.unwrap();
        assert_eq!(current.age, Some(3.0));
        assert_eq!(current.name, "tom");
    }

    #[tokio::test]
    async fn test_remove_only_removes_given_kitten() {
        let service = service();
        let tom = service.save(new_kitten("tom")).await.unwrap();
        let felix = service.save(new_kitten("felix")).await.unwrap();

        let removed = service.remove(tom.id).await.unwrap();
        assert_eq!(removed.id, tom.id);

        let remaining = service.list_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, felix.id);

        let err = service.remove(tom.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::KittenNotFound(_)));
    }

    #[tokio::test]
    async fn test_set_color_appends_in_order() {
        let service = service();
        let saved = service.save(new_kitten("tom")).await.unwrap();

        let once = service.set_color(saved.id, "black".to_string()).await.unwrap();
        assert_eq!(once.colors.len(), 1);
        assert_eq!(once.colors[0].name, "black");

        let twice = service.set_color(saved.id, "white".to_string()).await.unwrap();
        let names: Vec<_> = twice.colors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["black", "white"]);
    }

    #[tokio::test]
    async fn test_set_color_unknown_kitten() {
        let service = service();
        let err = service
            .set_color(ObjectId::new(), "black".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::KittenNotFound(_)));
    }

    #[tokio::test]
    async fn test_set_colors_persists() {
        let service = service();
        let saved = service.save(new_kitten("tom")).await.unwrap();

        service
            .set_colors(saved.id, vec!["gray".to_string(), "white".to_string()])
            .await
            .unwrap();

        let stored = service.get_one(saved.id).await.unwrap();
        let names: Vec<_> = stored.colors.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["gray", "white"]);
    }

    #[tokio::test]
    async fn test_remove_color() {
        let service = service();
        let saved = service.save(new_kitten("tom")).await.unwrap();
        let kitten = service
            .set_colors(saved.id, vec!["gray".to_string(), "white".to_string()])
            .await
            .unwrap();
        let gray = kitten.colors[0].id;

        let updated = service.remove_color(saved.id, gray).await.unwrap();
        assert_eq!(updated.colors.len(), 1);
        assert_eq!(updated.colors[0].name, "white");
    }

    #[tokio::test]
    async fn test_remove_unknown_color_still_writes() {
        let service = service();
        let saved = service.save(new_kitten("tom")).await.unwrap();
        let before = service.set_color(saved.id, "gray".to_string()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;

        let after = service.remove_color(saved.id, ObjectId::new()).await.unwrap();

        assert_eq!(after.colors, before.colors);
        assert!(after.updated_at > before.updated_at);

        let stored = service.get_one(saved.id).await.unwrap();
        assert_eq!(stored.updated_at, after.updated_at);
    }

    #[tokio::test]
    async fn test_modify_color_round_trip() {
        let service = service();
        let saved = service.save(new_kitten("tom")).await.unwrap();
        let kitten = service.set_color(saved.id, "gray".to_string()).await.unwrap();
        let gray = kitten.colors[0].id;

        service
            .modify_color(saved.id, gray, "black".to_string())
            .await
            .unwrap();

        let stored = service.get_one(saved.id).await.unwrap();
        assert_eq!(stored.colors.len(), 1);
        assert_eq!(stored.colors[0].id, gray);
        assert_eq!(stored.colors[0].name, "black");
    }

    #[tokio::test]
    async fn test_modify_color_not_found() {
        let service = service();
        let saved = service.save(new_kitten("tom")).await.unwrap();
        let color_id = ObjectId::new();

        let err = service
            .modify_color(saved.id, color_id, "black".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ColorNotFound(missing) if missing == color_id));

        let err = service
            .modify_color(ObjectId::new(), color_id, "black".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::KittenNotFound(_)));
    }

    #[tokio::test]
    async fn test_color_detail() {
        let service = service();
        service.save(new_kitten("felix")).await.unwrap();
        let saved = service.save(new_kitten("tom")).await.unwrap();
        let kitten = service.set_color(saved.id, "gray".to_string()).await.unwrap();
        let gray = kitten.colors[0].clone();

        let color = service.color_detail(gray.id).await.unwrap();
        assert_eq!(color, gray);

        let err = service.color_detail(ObjectId::new()).await.unwrap_err();
        assert!(matches!(err, ServiceError::ColorNotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_set_color_keeps_both_appends() {
        let service = service();
        let saved = service.save(new_kitten("tom")).await.unwrap();

        let (a, b) = tokio::join!(
            service.set_color(saved.id, "black".to_string()),
            service.set_color(saved.id, "white".to_string()),
        );
        a.unwrap();
        b.unwrap();

        let stored = service.get_one(saved.id).await.unwrap();
        let mut names: Vec<_> = stored.colors.iter().map(|c| c.name.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["black", "white"]);
    }

    #[tokio::test]
    async fn test_health_check() {
        assert!(service().health_check().await.is_ok());
    }
}
