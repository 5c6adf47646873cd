//! 集成测试公共工具: 通过 `oneshot` 直接驱动完整的路由栈

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use parkbite_server::services::build_router;
use parkbite_server::{Config, ServerState};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const PASSWORD: &str = "password123";
pub const EMPLOYEE: &str = "ananya@techcorp.in";
pub const OTHER_EMPLOYEE: &str = "karthik@techcorp.in";
/// rest-1 的经理
pub const MANAGER: &str = "rahul@spiceroute.in";
/// rest-2 的经理
pub const OTHER_MANAGER: &str = "lakshmi@dosajunction.in";

pub struct TestApp {
    pub state: ServerState,
    pub router: Router,
}

impl TestApp {
    /// 带演示数据、支付永不失败的应用
    pub async fn new() -> Self {
        Self::with_failure_rate(0.0).await
    }

    pub async fn with_failure_rate(failure_rate: f64) -> Self {
        let mut config = Config::default();
        config.payment_failure_rate = failure_rate;
        config.seed_demo_data = true;
        config.tracking_interval_secs = 30;
        let state = ServerState::initialize(&config)
            .await
            .expect("state initializes");
        let router = build_router(state.clone());
        Self { state, router }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("valid request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn login(&self, email: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed for {email}: {body}");
        body["token"].as_str().expect("token in login response").to_string()
    }

    /// 员工在 rest-1 下一个外送单: Paneer Tikka ×1 + Butter Naan ×2
    pub async fn place_order(&self, token: &str) -> Value {
        let (status, body) = self.post("/api/orders", Some(token), delivery_order()).await;
        assert_eq!(status, StatusCode::OK, "checkout failed: {body}");
        body
    }

    pub async fn advance(&self, token: &str, order_id: &str, estimate: Option<&str>) -> (StatusCode, Value) {
        let body = match estimate {
            Some(e) => json!({ "estimatedTime": e }),
            None => json!({}),
        };
        self.post(&format!("/api/orders/{order_id}/advance"), Some(token), body)
            .await
    }
}

/// 170 / 25 / 10 / 205
pub fn delivery_order() -> Value {
    json!({
        "restaurantId": "rest-1",
        "orderType": "delivery",
        "items": [
            { "menuItemId": "item-1", "name": "Paneer Tikka", "quantity": 1, "price": 120 },
            { "menuItemId": "item-3", "name": "Butter Naan", "quantity": 2, "price": 25 }
        ],
        "subtotal": 170,
        "deliveryCharge": 25,
        "gst": 10,
        "total": 205,
        "paymentMethod": "upi",
        "deliveryAddress": "Tower B, 6th floor, Manyata Tech Park"
    })
}
