use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use accredit_core::{Item, ItemStore, ItemStoreError, NewItem};

/// In-memory item store for tests and local development.
#[derive(Default, Clone)]
pub struct HashMapItemStore {
    items: Arc<RwLock<HashMap<i64, Item>>>,
    next_id: Arc<RwLock<i64>>,
}

impl HashMapItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ItemStore for HashMapItemStore {
    async fn add_item(&self, new_item: NewItem) -> Result<Item, ItemStoreError> {
        let mut items = self.items.write().await;
        let mut next_id = self.next_id.write().await;
        *next_id += 1;

        let item = Item {
            id: *next_id,
            title: new_item.title().to_string(),
            description: new_item.description().map(str::to_string),
            price_cents: new_item.price_cents(),
        };
        items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn get_item(&self, id: i64) -> Result<Item, ItemStoreError> {
        let items = self.items.read().await;
        items.get(&id).cloned().ok_or(ItemStoreError::ItemNotFound)
    }

    async fn list_items(&self) -> Result<Vec<Item>, ItemStoreError> {
        let items = self.items.read().await;
        let mut all: Vec<Item> = items.values().cloned().collect();
        all.sort_by_key(|item| item.id);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_list_items() {
        let store = HashMapItemStore::new();

        let first = store
            .add_item(NewItem::parse("Widget".to_string(), None, 1999).unwrap())
            .await
            .unwrap();
        let second = store
            .add_item(
                NewItem::parse(
                    "Gadget".to_string(),
                    Some("A fancier widget".to_string()),
                    2999,
                )
                .unwrap(),
            )
            .await
            .unwrap();

        let all = store.list_items().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_get_missing_item() {
        let store = HashMapItemStore::new();
        let result = store.get_item(42).await;
        assert_eq!(result.unwrap_err(), ItemStoreError::ItemNotFound);
    }
}
