//! Tech Park Model

use serde::{Deserialize, Serialize};

/// Tech park entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechPark {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub image: Option<String>,
    pub is_active: bool,
}
