use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::models::Item;

/// Repository trait for Item storage.
///
/// Single-record mutations are atomic with respect to each other.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Store a new item under a freshly assigned id. The draft's `id` is ignored.
    async fn create(&self, draft: Item) -> ItemResult<Item>;

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>>;

    /// All items in ascending id order.
    async fn list(&self) -> ItemResult<Vec<Item>>;

    /// Replace the mutable fields of an existing item. The stored `id` never changes.
    async fn update(&self, id: i64, patch: Item) -> ItemResult<Item>;

    /// Remove an item and return it.
    async fn delete(&self, id: i64) -> ItemResult<Item>;

    async fn exists(&self, id: i64) -> ItemResult<bool>;

    async fn count(&self) -> ItemResult<usize>;
}

/// A record cell. `None` marks a deleted record that a concurrent writer may
/// still hold a handle to.
type Slot = Arc<RwLock<Option<Item>>>;

#[derive(Debug)]
struct Inner {
    slots: RwLock<BTreeMap<i64, Slot>>,
    next_id: AtomicI64,
}

/// In-memory implementation of ItemRepository.
///
/// Reads and writes of a record lock that record's slot, so single-record
/// operations on different ids do not contend. The index lock is taken briefly
/// to look up, insert or unlink a slot, and for the whole of a `list`, which
/// read-locks every slot to return a point-in-time snapshot. Lock order is
/// always index before slot. Ids start at 1 and are never reused.
#[derive(Debug, Clone)]
pub struct InMemoryItemRepository {
    inner: Arc<Inner>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    fn starting_at(next_id: i64) -> Self {
        Self {
            inner: Arc::new(Inner {
                slots: RwLock::new(BTreeMap::new()),
                next_id: AtomicI64::new(next_id),
            }),
        }
    }

    fn allocate_id(&self) -> ItemResult<i64> {
        self.inner
            .next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
            .map_err(|_| ItemError::Internal("item identifier space exhausted".to_string()))
    }

    async fn slot(&self, id: i64) -> Option<Slot> {
        self.inner.slots.read().await.get(&id).cloned()
    }
}

impl Default for InMemoryItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, draft: Item) -> ItemResult<Item> {
        let id = self.allocate_id()?;
        let item = Item { id, ..draft };

        self.inner
            .slots
            .write()
            .await
            .insert(id, Arc::new(RwLock::new(Some(item.clone()))));

        tracing::info!(item_id = id, "Created item");
        Ok(item)
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        match self.slot(id).await {
            Some(slot) => Ok(slot.read().await.clone()),
            None => Ok(None),
        }
    }

    async fn list(&self) -> ItemResult<Vec<Item>> {
        // Every record is read-locked before any is copied, so no write lands
        // part-way through a listing.
        let index = self.inner.slots.read().await;
        let mut records = Vec::with_capacity(index.len());
        for slot in index.values() {
            records.push(slot.read().await);
        }

        Ok(records.iter().filter_map(|record| (**record).clone()).collect())
    }

    async fn update(&self, id: i64, patch: Item) -> ItemResult<Item> {
        let slot = self.slot(id).await.ok_or(ItemError::NotFound(id))?;
        let mut record = slot.write().await;
        let item = record.as_mut().ok_or(ItemError::NotFound(id))?;

        item.name = patch.name;
        item.size = patch.size;
        item.secret = patch.secret;

        tracing::info!(item_id = id, "Updated item");
        Ok(item.clone())
    }

    async fn delete(&self, id: i64) -> ItemResult<Item> {
        let slot = self
            .inner
            .slots
            .write()
            .await
            .remove(&id)
            .ok_or(ItemError::NotFound(id))?;

        let removed = slot.write().await.take().ok_or(ItemError::NotFound(id))?;

        tracing::info!(item_id = id, "Deleted item");
        Ok(removed)
    }

    async fn exists(&self, id: i64) -> ItemResult<bool> {
        Ok(self.inner.slots.read().await.contains_key(&id))
    }

    async fn count(&self) -> ItemResult<usize> {
        Ok(self.inner.slots.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemSize;
    use std::time::Duration;

    fn draft(name: &str, size: ItemSize) -> Item {
        Item {
            id: 0,
            name: Some(name.to_string()),
            size,
            secret: None,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryItemRepository::new();

        let first = repo.create(draft("a", ItemSize::Small)).await.unwrap();
        let second = repo.create(draft("b", ItemSize::Large)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.get_by_id(2).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_create_ignores_draft_id_and_keeps_secret() {
        let repo = InMemoryItemRepository::new();
        let mut input = draft("a", ItemSize::Small);
        input.id = 99;
        input.secret = Some("s3".to_string());

        let created = repo.create(input).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.secret.as_deref(), Some("s3"));
        assert!(!repo.exists(99).await.unwrap());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryItemRepository::new();
        let first = repo.create(draft("a", ItemSize::Small)).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let next = repo.create(draft("b", ItemSize::Small)).await.unwrap();
        assert_eq!(next.id, first.id + 1);
    }

    #[tokio::test]
    async fn test_update_keeps_stored_id() {
        let repo = InMemoryItemRepository::new();
        let created = repo.create(draft("a", ItemSize::Small)).await.unwrap();

        let mut patch = draft("renamed", ItemSize::Large);
        patch.id = 777;
        let updated = repo.update(created.id, patch).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name.as_deref(), Some("renamed"));
        assert!(!repo.exists(777).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let repo = InMemoryItemRepository::new();

        assert_eq!(
            repo.update(4, draft("x", ItemSize::Small)).await,
            Err(ItemError::NotFound(4))
        );
        assert_eq!(repo.delete(4).await, Err(ItemError::NotFound(4)));
        assert_eq!(repo.get_by_id(4).await, Ok(None));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_record() {
        let repo = InMemoryItemRepository::new();
        let created = repo.create(draft("gone", ItemSize::Medium)).await.unwrap();

        let removed = repo.delete(created.id).await.unwrap();
        assert_eq!(removed, created);
        assert!(!repo.exists(created.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_is_in_id_order() {
        let repo = InMemoryItemRepository::new();
        for name in ["a", "b", "c"] {
            repo.create(draft(name, ItemSize::Small)).await.unwrap();
        }
        repo.delete(2).await.unwrap();

        let ids: Vec<_> = repo.list().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_list_is_a_snapshot_across_records() {
        let repo = InMemoryItemRepository::new();
        repo.create(draft("a", ItemSize::Small)).await.unwrap();
        repo.create(draft("b", ItemSize::Small)).await.unwrap();

        // A writer is part-way through changing record 2.
        let slot = repo.slot(2).await.unwrap();
        let mut record = slot.write().await;
        if let Some(item) = record.as_mut() {
            item.name = Some("b2".to_string());
        }

        let listing = tokio::spawn({
            let repo = repo.clone();
            async move { repo.list().await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        // The listing already holds record 1, so a write to it has to wait.
        let late_write = tokio::time::timeout(
            Duration::from_millis(50),
            repo.update(1, draft("a2", ItemSize::Large)),
        )
        .await;
        assert!(late_write.is_err());

        drop(record);
        let names: Vec<String> = listing
            .await
            .unwrap()
            .unwrap()
            .into_iter()
            .filter_map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["a", "b2"]);

        repo.update(1, draft("a2", ItemSize::Large)).await.unwrap();
    }

    #[tokio::test]
    async fn test_writer_holding_a_deleted_slot_sees_not_found() {
        let repo = InMemoryItemRepository::new();
        let created = repo.create(draft("a", ItemSize::Small)).await.unwrap();

        // A writer that resolved the slot before the delete unlinked it.
        let stale = repo.slot(created.id).await.unwrap();
        repo.delete(created.id).await.unwrap();

        assert!(stale.read().await.is_none());
        assert_eq!(
            repo.update(created.id, draft("late", ItemSize::Large)).await,
            Err(ItemError::NotFound(created.id))
        );
    }

    #[tokio::test]
    async fn test_exhausted_id_space_is_internal_error() {
        let repo = InMemoryItemRepository::starting_at(i64::MAX);

        let result = repo.create(draft("last", ItemSize::Small)).await;
        assert!(matches!(result, Err(ItemError::Internal(_))));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_unique_ids() {
        let repo = InMemoryItemRepository::new();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(draft(&format!("item-{i}"), ItemSize::Small))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 32);
        assert_eq!(repo.count().await.unwrap(), 32);
    }
}
