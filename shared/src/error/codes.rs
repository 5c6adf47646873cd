//! Unified error codes for ParkBite
//!
//! This module defines all error codes used by parkbite-server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Cart errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Menu errors
//! - 7xxx: Location errors (tech parks, restaurants)
//! - 8xxx: User errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Manager role required
    ManagerRequired = 2003,

    // ==================== 3xxx: Cart ====================
    /// Cart already holds items from another restaurant
    CartRestaurantMismatch = 3001,
    /// Item is not in the cart
    CartItemNotFound = 3002,
    /// Cart quantity is invalid
    CartQuantityInvalid = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order is delivered or cancelled
    OrderAlreadyTerminal = 4008,
    /// Status transition not allowed
    InvalidStatusTransition = 4009,
    /// Preparation estimate required
    EstimatedTimeRequired = 4010,
    /// Preparation estimate is not one of the offered options
    InvalidEstimatedTime = 4011,
    /// Unknown order status
    InvalidOrderStatus = 4012,
    /// Delivery address required for delivery orders
    DeliveryAddressRequired = 4013,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Invalid payment method
    PaymentInvalidMethod = 5003,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item is not available
    MenuItemUnavailable = 6003,
    /// Menu category not found
    CategoryNotFound = 6101,

    // ==================== 7xxx: Location ====================
    /// Tech park not found
    TechParkNotFound = 7001,
    /// Restaurant not found
    RestaurantNotFound = 7101,
    /// Restaurant is closed
    RestaurantClosed = 7102,

    // ==================== 8xxx: User ====================
    /// User not found
    UserNotFound = 8001,
    /// Notification not found
    NotificationNotFound = 8201,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Not authorized",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::ManagerRequired => "Restaurant manager role is required",

            // Cart
            ErrorCode::CartRestaurantMismatch => "Cart contains items from another restaurant",
            ErrorCode::CartItemNotFound => "Item is not in the cart",
            ErrorCode::CartQuantityInvalid => "Quantity must be between 1 and 99",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyTerminal => "Order is already delivered or cancelled",
            ErrorCode::InvalidStatusTransition => "Status transition is not allowed",
            ErrorCode::EstimatedTimeRequired => "Preparation time estimate is required",
            ErrorCode::InvalidEstimatedTime => "Preparation time estimate is not valid",
            ErrorCode::InvalidOrderStatus => "Unknown order status",
            ErrorCode::DeliveryAddressRequired => "Delivery address is required",

            // Payment
            ErrorCode::PaymentFailed => "Payment failed, please try again",
            ErrorCode::PaymentInvalidMethod => "Payment method not available for this order type",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemUnavailable => "Menu item is currently unavailable",
            ErrorCode::CategoryNotFound => "Menu category not found",

            // Location
            ErrorCode::TechParkNotFound => "Tech park not found",
            ErrorCode::RestaurantNotFound => "Restaurant not found",
            ErrorCode::RestaurantClosed => "Restaurant is closed",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::NotificationNotFound => "Notification not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::ManagerRequired),

            // Cart
            3001 => Ok(ErrorCode::CartRestaurantMismatch),
            3002 => Ok(ErrorCode::CartItemNotFound),
            3003 => Ok(ErrorCode::CartQuantityInvalid),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4008 => Ok(ErrorCode::OrderAlreadyTerminal),
            4009 => Ok(ErrorCode::InvalidStatusTransition),
            4010 => Ok(ErrorCode::EstimatedTimeRequired),
            4011 => Ok(ErrorCode::InvalidEstimatedTime),
            4012 => Ok(ErrorCode::InvalidOrderStatus),
            4013 => Ok(ErrorCode::DeliveryAddressRequired),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5003 => Ok(ErrorCode::PaymentInvalidMethod),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6003 => Ok(ErrorCode::MenuItemUnavailable),
            6101 => Ok(ErrorCode::CategoryNotFound),

            // Location
            7001 => Ok(ErrorCode::TechParkNotFound),
            7101 => Ok(ErrorCode::RestaurantNotFound),
            7102 => Ok(ErrorCode::RestaurantClosed),

            // User
            8001 => Ok(ErrorCode::UserNotFound),
            8201 => Ok(ErrorCode::NotificationNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
