//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    /// Tech park reference
    pub tech_park_id: String,
    /// Manager (user) reference, one manager per restaurant
    pub manager_id: String,
    pub name: String,
    pub cuisine: String,
    pub description: String,
    pub image: Option<String>,
    pub rating: f32,
    /// Display string, e.g. "25-30 min"
    pub delivery_time: String,
    pub is_open: bool,
    /// Pure vegetarian kitchen
    pub is_veg: bool,
}
