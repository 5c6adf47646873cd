use shared::order::TransitionError;
use thiserror::Error;

use crate::db::repository::RepoError;
use crate::payment::PaymentError;
use crate::utils::{AppError, ErrorCode};

/// Manager errors
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("Invalid order: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error(transparent)]
    App(#[from] AppError),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Not authorized")]
    NotAuthorized,

    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),

    #[error("Restaurant is closed: {0}")]
    RestaurantClosed(String),

    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    #[error("Menu item is unavailable: {0}")]
    MenuItemUnavailable(String),

    #[error("Delivery address is required for delivery orders")]
    DeliveryAddressRequired,
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Repo(e) => {
                tracing::error!(error = %e, "Order storage error");
                e.into()
            }
            ManagerError::Transition(e) => e.into(),
            ManagerError::Payment(e) => e.into(),
            ManagerError::Invalid(e) => e.into(),
            ManagerError::App(e) => e,
            ManagerError::OrderNotFound(id) => {
                AppError::missing(ErrorCode::OrderNotFound, id)
            }
            ManagerError::NotAuthorized => AppError::not_authorized(),
            ManagerError::RestaurantNotFound(id) => {
                AppError::missing(ErrorCode::RestaurantNotFound, id)
            }
            ManagerError::RestaurantClosed(id) => {
                AppError::new(ErrorCode::RestaurantClosed).with_detail("restaurantId", id)
            }
            ManagerError::MenuItemNotFound(id) => {
                AppError::new(ErrorCode::MenuItemNotFound).with_detail("menuItemId", id)
            }
            ManagerError::MenuItemUnavailable(id) => {
                AppError::new(ErrorCode::MenuItemUnavailable).with_detail("menuItemId", id)
            }
            ManagerError::DeliveryAddressRequired => {
                AppError::new(ErrorCode::DeliveryAddressRequired).with_detail(
                    "fields",
                    serde_json::json!({ "deliveryAddress": ["required"] }),
                )
            }
        }
    }
}

pub type ManagerResult<T> = Result<T, ManagerError>;
