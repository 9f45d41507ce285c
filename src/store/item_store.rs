//! In-memory item store.

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::types::{Item, ItemId, ItemPatch, NewItem};
use crate::error::StoreError;
use crate::metrics;

/// Sample records loaded at startup: (name, description).
const SAMPLE_ITEMS: [(&str, &str); 3] = [
    ("Item 1", "First item"),
    ("Item 2", "Second item"),
    ("Item 3", "Third item"),
];

#[derive(Debug, Default)]
struct Inner {
    /// Items in insertion order.
    items: Vec<Item>,
    /// Largest id ever handed out. Never decreases.
    high_water: ItemId,
}

impl Inner {
    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn next_id(&mut self) -> ItemId {
        self.high_water += 1;
        self.high_water
    }
}

/// Shared, ordered collection of items.
///
/// Cloning is cheap and every clone sees the same items. Each mutating
/// operation holds the write lock for its whole read-modify-write span, so
/// concurrent creates never compute the same id.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    inner: Arc<RwLock<Inner>>,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the three sample items (ids 1, 2, 3).
    pub fn with_sample_items() -> Self {
        let now = OffsetDateTime::now_utc();
        let items = SAMPLE_ITEMS
            .iter()
            .zip(1..)
            .map(|(&(name, description), id)| Item {
                id,
                name: name.to_string(),
                description: description.to_string(),
                created_at: now,
                updated_at: None,
            })
            .collect();

        Self::from_items(items)
    }

    /// Create a store from existing records, keeping their order.
    pub fn from_items(items: Vec<Item>) -> Self {
        let high_water = items.iter().map(|item| item.id).max().unwrap_or(0);
        metrics::set_items_stored(items.len());

        Self {
            inner: Arc::new(RwLock::new(Inner { items, high_water })),
        }
    }

    /// All items in insertion order.
    pub async fn list(&self) -> Vec<Item> {
        self.inner.read().await.items.clone()
    }

    /// Number of items currently held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    /// Whether the store holds no items.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.items.is_empty()
    }

    /// Look up one item.
    pub async fn get(&self, id: ItemId) -> Result<Item, StoreError> {
        let inner = self.inner.read().await;
        inner
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Validate and store a new item, assigning the next id.
    #[instrument(skip(self, new_item))]
    pub async fn create(&self, new_item: NewItem) -> Result<Item, StoreError> {
        let name = match new_item.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                metrics::inc_validation_errors();
                return Err(StoreError::MissingField { field: "Name" });
            }
        };

        let mut inner = self.inner.write().await;
        let item = Item {
            id: inner.next_id(),
            name,
            description: new_item.description.unwrap_or_default(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: None,
        };
        inner.items.push(item.clone());

        metrics::inc_items_created();
        metrics::set_items_stored(inner.items.len());
        info!(id = item.id, name = %item.name, "item created");

        Ok(item)
    }

    /// Apply a patch to an existing item. `updated_at` is always refreshed.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: ItemId, patch: ItemPatch) -> Result<Item, StoreError> {
        let mut inner = self.inner.write().await;
        let index = inner.position(id).ok_or(StoreError::NotFound(id))?;

        let item = &mut inner.items[index];
        patch.apply(item, OffsetDateTime::now_utc());

        metrics::inc_items_updated();
        debug!(id, "item updated");

        Ok(item.clone())
    }

    /// Remove an item and return it. Its id is not handed out again.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ItemId) -> Result<Item, StoreError> {
        let mut inner = self.inner.write().await;
        let index = inner.position(id).ok_or(StoreError::NotFound(id))?;

        let removed = inner.items.remove(index);

        metrics::inc_items_deleted();
        metrics::set_items_stored(inner.items.len());
        info!(id, "item deleted");

        Ok(removed)
    }
}
