//! 认证中间件
//!
//! 为 JWT 认证和角色检查提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{HeaderMap, Method, Uri};

use crate::auth::{CurrentUser, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::{AppError, ErrorCode};

/// 无需登录的 API 路由
///
/// - `POST /api/auth/login`
/// - `GET /api/tech-parks/**` (园区与餐厅浏览)
/// - `GET /api/restaurants/**` (餐厅详情与菜单)
fn is_public_api_route(method: &Method, path: &str) -> bool {
    if path == "/api/auth/login" {
        return true;
    }
    method == Method::GET
        && (path.starts_with("/api/tech-parks") || path.starts_with("/api/restaurants/"))
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (`/health`)
/// - 公共浏览接口，见 [`is_public_api_route`]
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 NotAuthenticated |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_api_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state, req.headers(), req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// 校验 Bearer 令牌并还原 [`CurrentUser`]
///
/// 中间件和 [`CurrentUser`] 提取器共用；失败时写入安全日志。
pub(crate) fn authenticate(
    state: &ServerState,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<CurrentUser, AppError> {
    let Some(header) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        security_log!("WARN", "auth_missing", uri = uri.to_string());
        return Err(AppError::unauthorized());
    };

    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = state.get_jwt_service().validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = e.to_string(),
            uri = uri.to_string()
        );
        AppError::from(e)
    })?;

    CurrentUser::try_from(claims)
        .map_err(|e| AppError::invalid_token(format!("Malformed JWT claims: {}", e)))
}

/// 餐厅经理中间件 - 要求经理角色且绑定了餐厅
///
/// 在查找任何资源之前拒绝非经理用户。
///
/// # 错误
///
/// 非经理返回 403 ManagerRequired
pub async fn require_manager(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req.current_user()?;
    if user.managed_restaurant().is_err() {
        security_log!(
            "WARN",
            "manager_required",
            user_id = user.id.clone(),
            user_role = user.role.as_str(),
            uri = format!("{:?}", req.uri())
        );
        return Err(AppError::new(ErrorCode::ManagerRequired));
    }

    Ok(next.run(req).await)
}

/// 从请求中提取 CurrentUser 的扩展方法
pub trait CurrentUserExt {
    /// 从请求扩展中获取 CurrentUser
    ///
    /// # 错误
    ///
    /// 未认证返回 401 Unauthorized
    fn current_user(&self) -> Result<&CurrentUser, AppError>;
}

impl CurrentUserExt for Request {
    fn current_user(&self) -> Result<&CurrentUser, AppError> {
        self.extensions()
            .get::<CurrentUser>()
            .ok_or(AppError::unauthorized())
    }
}
