//! Restaurant Order Board Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use shared::models::{Order, OrderListQuery};
use shared::order::{OrderStatus, TransitionError};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::AppResult;

/// 解析逗号分隔的状态过滤，空值表示不过滤
pub(crate) fn parse_status_filter(raw: Option<&str>) -> Result<Option<Vec<OrderStatus>>, TransitionError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<OrderStatus>)
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// GET /api/restaurant/orders?status=
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let statuses = parse_status_filter(query.status.as_deref())?;
    let orders = state
        .orders
        .list_for_restaurant(&user, statuses.as_deref())
        .await?;
    Ok(Json(orders))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_filter() {
        assert_eq!(parse_status_filter(None).unwrap(), None);
        assert_eq!(parse_status_filter(Some("  ")).unwrap(), None);
        assert_eq!(
            parse_status_filter(Some("placed, Confirmed")).unwrap(),
            Some(vec![OrderStatus::Placed, OrderStatus::Confirmed])
        );
        assert!(matches!(
            parse_status_filter(Some("placed,lost")),
            Err(TransitionError::UnknownStatus(s)) if s == "lost"
        ));
    }
}
