//! Catalog Repository (tech parks, restaurants, menu categories)

use shared::models::{MenuCategory, Restaurant, TechPark};

use super::RepoResult;
use crate::db::MemoryStore;

#[derive(Debug, Clone)]
pub struct CatalogRepository {
    store: MemoryStore,
}

impl CatalogRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Find all active tech parks ordered by name
    pub async fn find_tech_parks(&self) -> RepoResult<Vec<TechPark>> {
        let mut parks: Vec<TechPark> = self
            .store
            .tables()
            .tech_parks
            .iter()
            .filter(|p| p.is_active)
            .map(|p| p.value().clone())
            .collect();
        parks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(parks)
    }

    pub async fn find_tech_park(&self, id: &str) -> RepoResult<Option<TechPark>> {
        Ok(self.store.tables().tech_parks.get(id).map(|p| p.clone()))
    }

    /// Find restaurants of a tech park ordered by name
    pub async fn find_restaurants_by_park(&self, tech_park_id: &str) -> RepoResult<Vec<Restaurant>> {
        let mut restaurants: Vec<Restaurant> = self
            .store
            .tables()
            .restaurants
            .iter()
            .filter(|r| r.tech_park_id == tech_park_id)
            .map(|r| r.value().clone())
            .collect();
        restaurants.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(restaurants)
    }

    pub async fn find_restaurant(&self, id: &str) -> RepoResult<Option<Restaurant>> {
        Ok(self.store.tables().restaurants.get(id).map(|r| r.clone()))
    }

    /// Find menu categories of a restaurant ordered by sort_order
    pub async fn find_categories(&self, restaurant_id: &str) -> RepoResult<Vec<MenuCategory>> {
        let mut categories: Vec<MenuCategory> = self
            .store
            .tables()
            .categories
            .iter()
            .filter(|c| c.restaurant_id == restaurant_id)
            .map(|c| c.value().clone())
            .collect();
        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.name.cmp(&b.name)));
        Ok(categories)
    }

    pub async fn find_category(&self, id: &str) -> RepoResult<Option<MenuCategory>> {
        Ok(self.store.tables().categories.get(id).map(|c| c.clone()))
    }

    pub async fn insert_tech_park(&self, park: TechPark) -> RepoResult<TechPark> {
        self.store
            .tables()
            .tech_parks
            .insert(park.id.clone(), park.clone());
        Ok(park)
    }

    pub async fn insert_restaurant(&self, restaurant: Restaurant) -> RepoResult<Restaurant> {
        self.store
            .tables()
            .restaurants
            .insert(restaurant.id.clone(), restaurant.clone());
        Ok(restaurant)
    }

    pub async fn insert_category(&self, category: MenuCategory) -> RepoResult<MenuCategory> {
        self.store
            .tables()
            .categories
            .insert(category.id.clone(), category.clone());
        Ok(category)
    }
}
