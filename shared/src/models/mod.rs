//! Data models
//!
//! Shared between parkbite-server and clients (via API).
//! Wire format is camelCase JSON. All IDs are `String`, money is integer currency units.

pub mod menu;
pub mod notification;
pub mod order;
pub mod restaurant;
pub mod tech_park;
pub mod user;

// Re-exports
pub use menu::*;
pub use notification::*;
pub use order::*;
pub use restaurant::*;
pub use tech_park::*;
pub use user::*;
