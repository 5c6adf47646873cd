//! 购物车
//!
//! 客户端会话内的购物车逻辑。同一菜品只保留一行 (重复加入时合并数量)，
//! 且购物车内只能有同一家餐厅的菜品。

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::payment::PaymentMethod;
use super::pricing::{OrderPricing, PricedLine, PricingCalculator};
use super::types::OrderType;
use crate::error::{AppError, ErrorCode};
use crate::models::{CreateOrderRequest, MenuItem, OrderItemInput};

/// 单行数量上限，与下单校验一致
pub const MAX_LINE_QUANTITY: u32 = 99;

/// 购物车错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("{0} is currently unavailable")]
    ItemUnavailable(String),

    #[error("cart already holds items from another restaurant")]
    RestaurantMismatch { cart: String, item: String },

    #[error("item {0} is not in the cart")]
    ItemNotFound(String),

    #[error("quantity must be between 1 and {MAX_LINE_QUANTITY}")]
    InvalidQuantity,
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        let message = err.to_string();
        match err {
            CartError::ItemUnavailable(name) => {
                AppError::with_message(ErrorCode::MenuItemUnavailable, message)
                    .with_detail("item", name)
            }
            CartError::RestaurantMismatch { cart, item } => {
                AppError::with_message(ErrorCode::CartRestaurantMismatch, message)
                    .with_detail("cartRestaurantId", cart)
                    .with_detail("itemRestaurantId", item)
            }
            CartError::ItemNotFound(id) => {
                AppError::with_message(ErrorCode::CartItemNotFound, message)
                    .with_detail("menuItemId", id)
            }
            CartError::InvalidQuantity => {
                AppError::with_message(ErrorCode::CartQuantityInvalid, message)
            }
        }
    }
}

/// 购物车条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub menu_item: MenuItem,
    pub quantity: u32,
}

impl PricedLine for CartItem {
    fn unit_price(&self) -> i64 {
        self.menu_item.price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// 购物车
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    restaurant_id: Option<String>,
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restaurant_id(&self) -> Option<&str> {
        self.restaurant_id.as_deref()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 加入菜品，已存在时合并数量
    pub fn add(&mut self, menu_item: MenuItem, quantity: u32) -> Result<(), CartError> {
        if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
            return Err(CartError::InvalidQuantity);
        }
        if !menu_item.is_available {
            return Err(CartError::ItemUnavailable(menu_item.name));
        }
        if let Some(current) = &self.restaurant_id {
            if *current != menu_item.restaurant_id {
                return Err(CartError::RestaurantMismatch {
                    cart: current.clone(),
                    item: menu_item.restaurant_id,
                });
            }
        }

        if let Some(line) = self.items.iter_mut().find(|l| l.menu_item.id == menu_item.id) {
            let merged = line.quantity.saturating_add(quantity);
            if merged > MAX_LINE_QUANTITY {
                return Err(CartError::InvalidQuantity);
            }
            line.quantity = merged;
        } else {
            self.restaurant_id = Some(menu_item.restaurant_id.clone());
            self.items.push(CartItem {
                menu_item,
                quantity,
            });
        }
        Ok(())
    }

    /// 设置数量，0 表示移除
    pub fn set_quantity(&mut self, menu_item_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(menu_item_id);
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CartError::InvalidQuantity);
        }
        let line = self
            .items
            .iter_mut()
            .find(|l| l.menu_item.id == menu_item_id)
            .ok_or_else(|| CartError::ItemNotFound(menu_item_id.to_string()))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, menu_item_id: &str) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|l| l.menu_item.id != menu_item_id);
        if self.items.len() == before {
            return Err(CartError::ItemNotFound(menu_item_id.to_string()));
        }
        if self.items.is_empty() {
            self.restaurant_id = None;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.restaurant_id = None;
    }

    /// 菜品总份数
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    pub fn pricing(&self, order_type: OrderType) -> OrderPricing {
        PricingCalculator::calculate(&self.items, order_type)
    }

    /// 转换为下单明细 (价格快照)
    pub fn to_order_items(&self) -> Vec<OrderItemInput> {
        self.items
            .iter()
            .map(|l| OrderItemInput {
                menu_item_id: l.menu_item.id.clone(),
                name: l.menu_item.name.clone(),
                quantity: l.quantity,
                price: l.menu_item.price,
            })
            .collect()
    }

    /// 生成结算请求，金额由本地计算
    pub fn checkout(
        &self,
        order_type: OrderType,
        payment_method: PaymentMethod,
        delivery_address: Option<String>,
        special_instructions: Option<String>,
    ) -> Option<CreateOrderRequest> {
        let restaurant_id = self.restaurant_id.clone()?;
        let pricing = self.pricing(order_type);
        Some(CreateOrderRequest {
            restaurant_id,
            order_type,
            items: self.to_order_items(),
            subtotal: pricing.subtotal,
            delivery_charge: pricing.delivery_charge,
            gst: pricing.gst,
            total: pricing.total,
            payment_method,
            delivery_address,
            special_instructions,
        })
    }
}
