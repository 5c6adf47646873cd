//! Menu Item Repository

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::{new_id, now_millis};

use super::{RepoError, RepoResult, Repository};
use crate::db::MemoryStore;

/// Create payload bound to the owning restaurant
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub restaurant_id: String,
    pub data: MenuItemCreate,
}

#[derive(Debug, Clone)]
pub struct MenuItemRepository {
    store: MemoryStore,
}

impl MenuItemRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Find all items of a restaurant ordered by name
    pub async fn find_by_restaurant(&self, restaurant_id: &str) -> RepoResult<Vec<MenuItem>> {
        let mut items: Vec<MenuItem> = self
            .store
            .tables()
            .menu_items
            .iter()
            .filter(|i| i.restaurant_id == restaurant_id)
            .map(|i| i.value().clone())
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    /// Toggle stock
    pub async fn set_availability(&self, id: &str, is_available: bool) -> RepoResult<MenuItem> {
        let mut item = self
            .store
            .tables()
            .menu_items
            .get_mut(id)
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {}", id)))?;
        item.is_available = is_available;
        item.updated_at = now_millis();
        Ok(item.clone())
    }

    /// Insert a fully built item (demo data)
    pub async fn insert(&self, item: MenuItem) -> RepoResult<MenuItem> {
        self.store
            .tables()
            .menu_items
            .insert(item.id.clone(), item.clone());
        Ok(item)
    }
}

impl Repository<MenuItem, NewMenuItem, MenuItemUpdate> for MenuItemRepository {
    async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        Ok(self
            .store
            .tables()
            .menu_items
            .iter()
            .map(|i| i.value().clone())
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        Ok(self.store.tables().menu_items.get(id).map(|i| i.clone()))
    }

    async fn create(&self, new: NewMenuItem) -> RepoResult<MenuItem> {
        if new.data.price < 0 {
            return Err(RepoError::Validation("price must not be negative".to_string()));
        }
        let now = now_millis();
        let item = MenuItem {
            id: new_id(),
            restaurant_id: new.restaurant_id,
            category_id: new.data.category_id,
            name: new.data.name,
            description: new.data.description,
            price: new.data.price,
            is_veg: new.data.is_veg,
            is_available: new.data.is_available.unwrap_or(true),
            image: new.data.image,
            created_at: now,
            updated_at: now,
        };
        self.insert(item).await
    }

    async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        if data.price.is_some_and(|p| p < 0) {
            return Err(RepoError::Validation("price must not be negative".to_string()));
        }
        let mut item = self
            .store
            .tables()
            .menu_items
            .get_mut(id)
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {}", id)))?;

        if let Some(category_id) = data.category_id {
            item.category_id = category_id;
        }
        if let Some(name) = data.name {
            item.name = name;
        }
        if let Some(description) = data.description {
            item.description = description;
        }
        if let Some(price) = data.price {
            item.price = price;
        }
        if let Some(is_veg) = data.is_veg {
            item.is_veg = is_veg;
        }
        if let Some(is_available) = data.is_available {
            item.is_available = is_available;
        }
        if data.image.is_some() {
            item.image = data.image;
        }
        item.updated_at = now_millis();
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        Ok(self.store.tables().menu_items.remove(id).is_some())
    }
}
