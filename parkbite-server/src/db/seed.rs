//! 演示数据
//!
//! 启动时写入固定 ID 的园区、餐厅、菜单和演示账号。
//! 所有演示账号共用 [`DEMO_PASSWORD`]。

use shared::models::{MenuCategory, MenuItem, Restaurant, TechPark, User, UserRole};
use shared::util::now_millis;

use super::MemoryStore;
use super::repository::{CatalogRepository, MenuItemRepository, UserRepository};
use crate::auth::hash_password;
use crate::utils::{AppError, AppResult};

/// 演示账号密码
pub const DEMO_PASSWORD: &str = "password123";

/// 写入结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub tech_parks: usize,
    pub restaurants: usize,
    pub menu_items: usize,
    pub users: usize,
}

fn tech_park(id: &str, name: &str, location: &str, description: &str, is_active: bool) -> TechPark {
    TechPark {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        description: description.to_string(),
        image: None,
        is_active,
    }
}

#[allow(clippy::too_many_arguments)]
fn restaurant(
    id: &str,
    tech_park_id: &str,
    manager_id: &str,
    name: &str,
    cuisine: &str,
    rating: f32,
    delivery_time: &str,
    is_open: bool,
    is_veg: bool,
) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        tech_park_id: tech_park_id.to_string(),
        manager_id: manager_id.to_string(),
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        description: format!("{cuisine} kitchen serving {name} favourites"),
        image: None,
        rating,
        delivery_time: delivery_time.to_string(),
        is_open,
        is_veg,
    }
}

fn category(id: &str, restaurant_id: &str, name: &str, sort_order: i32) -> MenuCategory {
    MenuCategory {
        id: id.to_string(),
        restaurant_id: restaurant_id.to_string(),
        name: name.to_string(),
        sort_order,
    }
}

/// (id, restaurant, category, name, price, veg, available)
type ItemRow = (&'static str, &'static str, &'static str, &'static str, i64, bool, bool);

const MENU: &[ItemRow] = &[
    ("item-1", "rest-1", "cat-1-1", "Paneer Tikka", 120, true, true),
    ("item-2", "rest-1", "cat-1-1", "Chicken 65", 160, false, true),
    ("item-3", "rest-1", "cat-1-2", "Butter Naan", 25, true, true),
    ("item-4", "rest-1", "cat-1-2", "Garlic Naan", 35, true, true),
    ("item-5", "rest-1", "cat-1-3", "Dal Makhani", 140, true, true),
    ("item-6", "rest-1", "cat-1-3", "Butter Chicken", 220, false, true),
    ("item-7", "rest-1", "cat-1-3", "Mutton Rogan Josh", 280, false, false),
    ("item-8", "rest-2", "cat-2-1", "Masala Dosa", 60, true, true),
    ("item-9", "rest-2", "cat-2-1", "Rava Dosa", 70, true, true),
    ("item-10", "rest-2", "cat-2-2", "Filter Coffee", 25, true, true),
    ("item-11", "rest-3", "cat-3-1", "Chicken Biryani", 240, false, true),
    ("item-12", "rest-3", "cat-3-1", "Veg Biryani", 180, true, true),
    ("item-13", "rest-4", "cat-4-1", "Quinoa Salad Bowl", 190, true, true),
];

/// (id, name, email, role, restaurant)
type UserRow = (&'static str, &'static str, &'static str, UserRole, Option<&'static str>);

const USERS: &[UserRow] = &[
    ("user-emp-1", "Ananya Sharma", "ananya@techcorp.in", UserRole::Employee, None),
    ("user-emp-2", "Karthik Iyer", "karthik@techcorp.in", UserRole::Employee, None),
    ("user-mgr-1", "Rahul Mehta", "rahul@spiceroute.in", UserRole::Manager, Some("rest-1")),
    ("user-mgr-2", "Lakshmi Rao", "lakshmi@dosajunction.in", UserRole::Manager, Some("rest-2")),
    ("user-mgr-3", "Imran Khan", "imran@biryanihouse.in", UserRole::Manager, Some("rest-3")),
    ("user-mgr-4", "Meera Nair", "meera@greenbowl.in", UserRole::Manager, Some("rest-4")),
];

/// 写入演示数据
pub async fn seed_demo_data(store: &MemoryStore) -> AppResult<SeedSummary> {
    let catalog = CatalogRepository::new(store.clone());
    let menu_items = MenuItemRepository::new(store.clone());
    let users = UserRepository::new(store.clone());
    let mut summary = SeedSummary::default();

    for park in [
        tech_park("tp-1", "Manyata Tech Park", "Nagawara, Bengaluru", "Bengaluru's largest tech campus", true),
        tech_park("tp-2", "HITEC City", "Madhapur, Hyderabad", "Hyderabad's IT corridor", true),
        tech_park("tp-3", "DLF Cyber City", "Gurugram", "Onboarding soon", false),
    ] {
        catalog.insert_tech_park(park).await?;
        summary.tech_parks += 1;
    }

    for r in [
        restaurant("rest-1", "tp-1", "user-mgr-1", "Spice Route", "North Indian", 4.5, "25-30 min", true, false),
        restaurant("rest-2", "tp-1", "user-mgr-2", "Dosa Junction", "South Indian", 4.3, "15-20 min", true, true),
        restaurant("rest-3", "tp-2", "user-mgr-3", "Biryani House", "Hyderabadi", 4.6, "30-35 min", true, false),
        restaurant("rest-4", "tp-2", "user-mgr-4", "Green Bowl", "Healthy", 4.1, "20-25 min", false, true),
    ] {
        catalog.insert_restaurant(r).await?;
        summary.restaurants += 1;
    }

    for c in [
        category("cat-1-1", "rest-1", "Starters", 1),
        category("cat-1-2", "rest-1", "Breads", 2),
        category("cat-1-3", "rest-1", "Mains", 3),
        category("cat-2-1", "rest-2", "Dosas", 1),
        category("cat-2-2", "rest-2", "Beverages", 2),
        category("cat-3-1", "rest-3", "Biryani", 1),
        category("cat-4-1", "rest-4", "Bowls", 1),
    ] {
        catalog.insert_category(c).await?;
    }

    let now = now_millis();
    for (id, restaurant_id, category_id, name, price, is_veg, is_available) in MENU {
        menu_items
            .insert(MenuItem {
                id: id.to_string(),
                restaurant_id: restaurant_id.to_string(),
                category_id: category_id.to_string(),
                name: name.to_string(),
                description: String::new(),
                price: *price,
                is_veg: *is_veg,
                is_available: *is_available,
                image: None,
                created_at: now,
                updated_at: now,
            })
            .await?;
        summary.menu_items += 1;
    }

    let password_hash = hash_password(DEMO_PASSWORD)
        .map_err(|e| AppError::internal(format!("Failed to hash demo password: {}", e)))?;
    for (id, name, email, role, restaurant_id) in USERS {
        users
            .insert(User {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                phone: None,
                role: *role,
                restaurant_id: restaurant_id.map(str::to_string),
                password_hash: password_hash.clone(),
            })
            .await?;
        summary.users += 1;
    }

    tracing::info!(
        tech_parks = summary.tech_parks,
        restaurants = summary.restaurants,
        menu_items = summary.menu_items,
        users = summary.users,
        "Demo data seeded"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_is_consistent() {
        let store = MemoryStore::new();
        let summary = seed_demo_data(&store).await.unwrap();
        assert_eq!(summary.users, USERS.len());

        let catalog = CatalogRepository::new(store.clone());
        // 每家餐厅的经理都绑定到该餐厅
        for (_, _, _, role, restaurant_id) in USERS {
            if let Some(rid) = restaurant_id {
                assert_eq!(*role, UserRole::Manager);
                let r = catalog.find_restaurant(rid).await.unwrap().unwrap();
                assert!(r.manager_id.starts_with("user-mgr-"));
            }
        }
        // 菜品的分类属于同一家餐厅
        for (_, restaurant_id, category_id, ..) in MENU {
            let c = catalog.find_category(category_id).await.unwrap().unwrap();
            assert_eq!(c.restaurant_id, *restaurant_id);
        }
        assert_eq!(catalog.find_tech_parks().await.unwrap().len(), 2);
    }
}
