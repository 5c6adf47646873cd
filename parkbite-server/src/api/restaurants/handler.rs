//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{MenuQuery, MenuSection, Restaurant, RestaurantMenu};

use crate::core::ServerState;
use crate::db::repository::{CatalogRepository, MenuItemRepository};
use crate::utils::{AppError, AppResult, ErrorCode};

async fn load_restaurant(repo: &CatalogRepository, id: String) -> AppResult<Restaurant> {
    repo.find_restaurant(&id)
        .await?
        .ok_or_else(|| AppError::missing(ErrorCode::RestaurantNotFound, id))
}

/// GET /api/restaurants/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    let repo = CatalogRepository::new(state.store.clone());
    Ok(Json(load_restaurant(&repo, id).await?))
}

/// GET /api/restaurants/{id}/menu - 按分类排序的菜单
///
/// 空分类 (过滤后没有菜品) 不返回。
pub async fn menu(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<RestaurantMenu>> {
    let catalog = CatalogRepository::new(state.store.clone());
    let menu_items = MenuItemRepository::new(state.store.clone());

    let restaurant = load_restaurant(&catalog, id).await?;
    let categories = catalog.find_categories(&restaurant.id).await?;
    let items: Vec<_> = menu_items
        .find_by_restaurant(&restaurant.id)
        .await?
        .into_iter()
        .filter(|item| query.matches(item))
        .collect();

    let sections = categories
        .into_iter()
        .map(|category| {
            let items = items
                .iter()
                .filter(|item| item.category_id == category.id)
                .cloned()
                .collect();
            MenuSection { category, items }
        })
        .filter(|section| !section.items.is_empty())
        .collect();

    Ok(Json(RestaurantMenu {
        restaurant,
        sections,
    }))
}
