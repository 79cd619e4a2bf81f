use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::mapper;
use crate::models::ItemView;
use crate::repository::ItemRepository;

/// Service layer for the item lifecycle.
///
/// The only caller of the repository. Every operation takes and returns
/// views; entities never leave this layer.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create an item. Any `id` on the view is ignored.
    pub async fn create_item(&self, view: ItemView) -> ItemResult<ItemView> {
        let created = self
            .repository
            .create(mapper::to_entity(view, None))
            .await?;

        Ok(mapper::to_view(&created))
    }

    pub async fn get_item(&self, id: i64) -> ItemResult<ItemView> {
        self.repository
            .get_by_id(id)
            .await?
            .map(|item| mapper::to_view(&item))
            .ok_or(ItemError::NotFound(id))
    }

    /// All items; empty when the store is empty.
    pub async fn list_items(&self) -> ItemResult<Vec<ItemView>> {
        let items = self.repository.list().await?;
        Ok(mapper::to_views(&items))
    }

    /// Replace an item's visible fields, keeping server-internal ones.
    ///
    /// The body id must match `id`. A record deleted after the existence
    /// check is reported as [`ItemError::Conflict`].
    #[instrument(skip(self, view))]
    pub async fn update_item(&self, id: i64, view: ItemView) -> ItemResult<ItemView> {
        if view.id != id {
            return Err(ItemError::Validation(format!(
                "path id {} does not match body id {}",
                id, view.id
            )));
        }

        if !self.repository.exists(id).await? {
            return Err(ItemError::NotFound(id));
        }

        let Some(existing) = self.repository.get_by_id(id).await? else {
            tracing::warn!("Item disappeared after existence check");
            return Err(ItemError::Conflict(id));
        };

        let merged = mapper::to_entity(view, Some(&existing));
        match self.repository.update(id, merged).await {
            Ok(updated) => Ok(mapper::to_view(&updated)),
            Err(ItemError::NotFound(_)) => {
                tracing::warn!("Item deleted while update was in flight");
                Err(ItemError::Conflict(id))
            }
            Err(err) => Err(err),
        }
    }

    /// Delete an item and return what was removed.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> ItemResult<ItemView> {
        if self.repository.get_by_id(id).await?.is_none() {
            return Err(ItemError::NotFound(id));
        }

        let removed = self.repository.delete(id).await?;
        Ok(mapper::to_view(&removed))
    }

    /// Number of stored items.
    pub async fn count_items(&self) -> ItemResult<usize> {
        self.repository.count().await
    }
}
