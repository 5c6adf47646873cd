//! Menu Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Restaurant;

/// Menu category (section of a restaurant menu)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub sort_order: i32,
}

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    /// Category reference
    pub category_id: String,
    pub name: String,
    pub description: String,
    /// Price in currency units, never negative
    pub price: i64,
    pub is_veg: bool,
    /// In stock
    pub is_available: bool,
    pub image: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu item payload (restaurant comes from the manager's token)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    #[validate(length(min = 1, message = "category is required"))]
    pub category_id: String,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    #[validate(range(min = 0, max = 100000, message = "price must be between 0 and 100000"))]
    pub price: i64,
    #[serde(default)]
    pub is_veg: bool,
    pub is_available: Option<bool>,
    pub image: Option<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    #[validate(length(min = 1))]
    pub category_id: Option<String>,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0, max = 100000, message = "price must be between 0 and 100000"))]
    pub price: Option<i64>,
    pub is_veg: Option<bool>,
    pub is_available: Option<bool>,
    pub image: Option<String>,
}

/// Toggle stock payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    pub is_available: bool,
}

/// Menu filters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    #[serde(default)]
    pub veg_only: bool,
    #[serde(default)]
    pub available_only: bool,
}

impl MenuQuery {
    pub fn matches(&self, item: &MenuItem) -> bool {
        (!self.veg_only || item.is_veg) && (!self.available_only || item.is_available)
    }
}

/// Category with its items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    #[serde(flatten)]
    pub category: MenuCategory,
    pub items: Vec<MenuItem>,
}

/// Full restaurant menu
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantMenu {
    pub restaurant: Restaurant,
    pub sections: Vec<MenuSection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let create = MenuItemCreate {
            category_id: "cat-1".to_string(),
            name: "Masala Dosa".to_string(),
            description: String::new(),
            price: -5,
            is_veg: true,
            is_available: None,
            image: None,
        };
        let errors = create.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_update_only_validates_present_fields() {
        let update = MenuItemUpdate {
            price: Some(80),
            ..Default::default()
        };
        assert!(update.validate().is_ok());

        let update = MenuItemUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_menu_query_filters() {
        let item = MenuItem {
            id: "m1".to_string(),
            restaurant_id: "r1".to_string(),
            category_id: "c1".to_string(),
            name: "Chicken Biryani".to_string(),
            description: String::new(),
            price: 220,
            is_veg: false,
            is_available: true,
            image: None,
            created_at: 0,
            updated_at: 0,
        };
        assert!(MenuQuery::default().matches(&item));
        assert!(!MenuQuery {
            veg_only: true,
            available_only: false
        }
        .matches(&item));
        assert!(MenuQuery {
            veg_only: false,
            available_only: true
        }
        .matches(&item));
    }
}
