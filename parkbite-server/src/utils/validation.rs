//! Input validation helpers
//!
//! Request payloads derive `validator::Validate`; handlers call [`validate`]
//! so field-level errors surface as `ValidationFailed` with a `fields` detail.

use validator::Validate;

use crate::utils::{AppError, AppResult};

/// Run derive-based validation on a payload
pub fn validate<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(AppError::from)
}

/// Validate that an optional string, if present, is not blank.
pub fn validate_not_blank(value: Option<&str>, field: &str) -> AppResult<()> {
    if let Some(v) = value
        && v.trim().is_empty()
    {
        return Err(AppError::invalid_field(field, format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::MenuItemUpdate;

    #[test]
    fn test_validate_maps_to_validation_failed() {
        let update = MenuItemUpdate {
            price: Some(-1),
            ..Default::default()
        };
        let err = validate(&update).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ValidationFailed);
        assert!(err.details.unwrap()["fields"].get("price").is_some());
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank(None, "deliveryAddress").is_ok());
        assert!(validate_not_blank(Some("Block A"), "deliveryAddress").is_ok());
        let err = validate_not_blank(Some("  "), "deliveryAddress").unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ValidationFailed);
    }
}
