//! Tech Park API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Restaurant, TechPark};

use crate::core::ServerState;
use crate::db::repository::CatalogRepository;
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/tech-parks - 启用中的园区
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<TechPark>>> {
    let repo = CatalogRepository::new(state.store.clone());
    Ok(Json(repo.find_tech_parks().await?))
}

/// GET /api/tech-parks/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TechPark>> {
    let repo = CatalogRepository::new(state.store.clone());
    let park = repo
        .find_tech_park(&id)
        .await?
        .ok_or_else(|| AppError::missing(ErrorCode::TechParkNotFound, id))?;
    Ok(Json(park))
}

/// GET /api/tech-parks/{id}/restaurants
pub async fn list_restaurants(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Restaurant>>> {
    let repo = CatalogRepository::new(state.store.clone());
    if repo.find_tech_park(&id).await?.is_none() {
        return Err(AppError::missing(ErrorCode::TechParkNotFound, id));
    }
    Ok(Json(repo.find_restaurants_by_park(&id).await?))
}
