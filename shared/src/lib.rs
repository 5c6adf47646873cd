//! Shared types for ParkBite
//!
//! Domain models, the unified error system, order pricing and the order status
//! state machine. Used by parkbite-server and by any client that needs to compute
//! the same totals and status labels the server shows.

pub mod client;
pub mod error;
pub mod message;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use message::{BusMessage, EventType};
pub use order::{Cart, OrderPricing, OrderStatus, OrderType, PricingCalculator};
