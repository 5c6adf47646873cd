//! Menu Item API Handlers
//!
//! 只有餐厅经理可以修改本餐厅的菜品。

use axum::{
    Json,
    extract::{Path, State},
};
use shared::message::{BusMessage, MenuChange, MenuItemChangedPayload};
use shared::models::{AvailabilityUpdate, MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{CatalogRepository, MenuItemRepository, NewMenuItem, Repository};
use crate::utils::validation::validate;
use crate::utils::{AppError, AppResult, ErrorCode};

/// 分类必须存在且属于本餐厅
async fn check_category(state: &ServerState, restaurant_id: &str, category_id: &str) -> AppResult<()> {
    let repo = CatalogRepository::new(state.store.clone());
    match repo.find_category(category_id).await? {
        Some(category) if category.restaurant_id == restaurant_id => Ok(()),
        _ => Err(AppError::new(ErrorCode::CategoryNotFound).with_detail("categoryId", category_id)),
    }
}

/// 加载本餐厅的菜品 (先 404 再 403)
async fn load_owned(state: &ServerState, user: &CurrentUser, id: &str) -> AppResult<MenuItem> {
    let restaurant_id = user.managed_restaurant()?;
    let repo = MenuItemRepository::new(state.store.clone());
    let item = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::missing(ErrorCode::MenuItemNotFound, id))?;
    if item.restaurant_id != restaurant_id {
        tracing::warn!(menu_item_id = %id, manager_id = %user.id, "Menu item belongs to another restaurant");
        return Err(AppError::not_authorized());
    }
    Ok(item)
}

fn publish_change(state: &ServerState, item: &MenuItem, change: MenuChange) {
    let payload = MenuItemChangedPayload {
        menu_item_id: item.id.clone(),
        restaurant_id: item.restaurant_id.clone(),
        change,
    };
    match BusMessage::menu_item_changed(&payload) {
        Ok(msg) => {
            state.message_bus.publish(msg);
        }
        Err(e) => tracing::error!(error = %e, menu_item_id = %item.id, "Failed to encode menu event"),
    }
}

/// POST /api/menu-items - 创建菜品
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate(&payload)?;
    let restaurant_id = user.managed_restaurant()?.to_string();
    check_category(&state, &restaurant_id, &payload.category_id).await?;

    let repo = MenuItemRepository::new(state.store.clone());
    let item = repo
        .create(NewMenuItem {
            restaurant_id,
            data: payload,
        })
        .await?;

    tracing::info!(menu_item_id = %item.id, restaurant_id = %item.restaurant_id, "Menu item created");
    publish_change(&state, &item, MenuChange::Created);
    Ok(Json(item))
}

/// PUT /api/menu-items/{id} - 更新菜品
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    validate(&payload)?;
    let existing = load_owned(&state, &user, &id).await?;
    if let Some(category_id) = payload.category_id.as_deref() {
        check_category(&state, &existing.restaurant_id, category_id).await?;
    }

    let repo = MenuItemRepository::new(state.store.clone());
    let item = repo.update(&id, payload).await?;

    tracing::info!(menu_item_id = %item.id, "Menu item updated");
    publish_change(&state, &item, MenuChange::Updated);
    Ok(Json(item))
}

/// PATCH /api/menu-items/{id}/availability - 切换库存
pub async fn set_availability(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<AvailabilityUpdate>,
) -> AppResult<Json<MenuItem>> {
    load_owned(&state, &user, &id).await?;

    let repo = MenuItemRepository::new(state.store.clone());
    let item = repo.set_availability(&id, payload.is_available).await?;

    tracing::info!(menu_item_id = %item.id, is_available = item.is_available, "Menu item availability changed");
    publish_change(&state, &item, MenuChange::Updated);
    Ok(Json(item))
}

/// DELETE /api/menu-items/{id} - 删除菜品
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let item = load_owned(&state, &user, &id).await?;

    let repo = MenuItemRepository::new(state.store.clone());
    let deleted = repo.delete(&id).await?;

    tracing::info!(menu_item_id = %id, "Menu item deleted");
    publish_change(&state, &item, MenuChange::Deleted);
    Ok(Json(deleted))
}
