//! User Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Tech-park employee placing orders
    Employee,
    /// Restaurant manager
    Manager,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Self::Employee),
            "manager" => Ok(Self::Manager),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// User entity (password hash never serialized)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    /// Managed restaurant (managers only)
    pub restaurant_id: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

impl User {
    pub fn is_manager(&self) -> bool {
        self.role == UserRole::Manager
    }
}
