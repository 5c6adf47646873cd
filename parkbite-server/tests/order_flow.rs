mod common;

use common::*;
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_checkout_stores_submitted_totals() {
    let app = TestApp::new().await;
    let token = app.login(EMPLOYEE).await;

    let order = app.place_order(&token).await;
    assert_eq!(order["status"], "placed");
    assert_eq!(order["subtotal"], 170);
    assert_eq!(order["deliveryCharge"], 25);
    assert_eq!(order["gst"], 10);
    assert_eq!(order["total"], 205);
    assert_eq!(order["paymentStatus"], "paid");
    assert_eq!(order["items"].as_array().unwrap().len(), 2);
    assert!(order["orderNumber"].as_str().unwrap().starts_with("ORD-"));

    let (status, mine) = app.get("/api/orders", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);

    // 下单不产生通知
    let (_, count) = app.get("/api/notifications/unread-count", Some(&token)).await;
    assert_eq!(count["unread"], 0);
}

#[tokio::test]
async fn test_checkout_rejections() {
    let app = TestApp::new().await;
    let token = app.login(EMPLOYEE).await;

    let mut closed = delivery_order();
    closed["restaurantId"] = json!("rest-4");
    closed["items"] = json!([{ "menuItemId": "item-13", "name": "Quinoa Salad Bowl", "quantity": 1, "price": 190 }]);
    let (status, body) = app.post("/api/orders", Some(&token), closed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7102);
    assert_eq!(body["details"]["restaurantId"], "rest-4");

    let mut sold_out = delivery_order();
    sold_out["items"] = json!([{ "menuItemId": "item-7", "name": "Mutton Rogan Josh", "quantity": 1, "price": 280 }]);
    let (status, body) = app.post("/api/orders", Some(&token), sold_out).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6003);
    assert_eq!(body["details"]["menuItemId"], "item-7");

    let mut no_address = delivery_order();
    no_address["deliveryAddress"] = json!("  ");
    let (status, body) = app.post("/api/orders", Some(&token), no_address).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4013);

    let mut wallet_dine_in = delivery_order();
    wallet_dine_in["orderType"] = json!("dine-in");
    wallet_dine_in["paymentMethod"] = json!("wallet");
    let (status, body) = app.post("/api/orders", Some(&token), wallet_dine_in).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5003);

    let (_, mine) = app.get("/api/orders", Some(&token)).await;
    assert!(mine.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_payment_creates_no_order() {
    let app = TestApp::with_failure_rate(1.0).await;
    let token = app.login(EMPLOYEE).await;

    let (status, body) = app.post("/api/orders", Some(&token), delivery_order()).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["code"], 5001);

    let (_, mine) = app.get("/api/orders", Some(&token)).await;
    assert!(mine.as_array().unwrap().is_empty());

    // 现金不经过网关
    let mut cash = delivery_order();
    cash["paymentMethod"] = json!("cash");
    let (status, order) = app.post("/api/orders", Some(&token), cash).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["paymentStatus"], "pending");
}

#[tokio::test]
async fn test_manager_walks_order_to_delivered() {
    let app = TestApp::new().await;
    let employee = app.login(EMPLOYEE).await;
    let manager = app.login(MANAGER).await;
    let order_id = app.place_order(&employee).await["id"].as_str().unwrap().to_string();

    let (status, body) = app.advance(&manager, &order_id, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4010);
    let (_, order) = app.get(&format!("/api/orders/{order_id}"), Some(&employee)).await;
    assert_eq!(order["status"], "placed");

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/orders/{order_id}/status"),
            Some(&manager),
            Some(json!({ "status": "preparing" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4009);

    let (status, resp) = app.advance(&manager, &order_id, Some("20-25 min")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["changed"], true);
    assert_eq!(resp["previousStatus"], "placed");
    assert_eq!(resp["order"]["estimatedTime"], "20-25 min");

    for expected in ["preparing", "ready", "dispatched", "delivered"] {
        let (status, resp) = app.advance(&manager, &order_id, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp["order"]["status"], expected);
    }

    let (status, body) = app.advance(&manager, &order_id, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4008);

    let (_, count) = app.get("/api/notifications/unread-count", Some(&employee)).await;
    assert_eq!(count["unread"], 5);
}

#[tokio::test]
async fn test_status_change_permissions() {
    let app = TestApp::new().await;
    let employee = app.login(EMPLOYEE).await;
    let other_manager = app.login(OTHER_MANAGER).await;
    let order_id = app.place_order(&employee).await["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(Method::POST, &format!("/api/orders/{order_id}/cancel"), Some(&employee), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);

    let (status, body) = app.advance(&other_manager, &order_id, Some("15-20 min")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);

    let (status, body) = app.advance(&other_manager, "no-such-order", Some("15-20 min")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);

    let (_, order) = app.get(&format!("/api/orders/{order_id}"), Some(&employee)).await;
    assert_eq!(order["status"], "placed");
    assert!(order["estimatedTime"].is_null());
}

#[tokio::test]
async fn test_dispatched_order_can_be_cancelled_once() {
    let app = TestApp::new().await;
    let employee = app.login(EMPLOYEE).await;
    let manager = app.login(MANAGER).await;
    let order_id = app.place_order(&employee).await["id"].as_str().unwrap().to_string();

    app.advance(&manager, &order_id, Some("15-20 min")).await;
    for _ in 0..3 {
        app.advance(&manager, &order_id, None).await;
    }
    let cancel_uri = format!("/api/orders/{order_id}/cancel");

    let (status, resp) = app.request(Method::POST, &cancel_uri, Some(&manager), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["previousStatus"], "dispatched");
    assert_eq!(resp["order"]["status"], "cancelled");

    let (status, body) = app.advance(&manager, &order_id, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4008);

    // 重复取消是空操作
    let (status, resp) = app.request(Method::POST, &cancel_uri, Some(&manager), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["changed"], false);
}

#[tokio::test]
async fn test_order_visibility() {
    let app = TestApp::new().await;
    let employee = app.login(EMPLOYEE).await;
    let other_employee = app.login(OTHER_EMPLOYEE).await;
    let manager = app.login(MANAGER).await;
    let order_id = app.place_order(&employee).await["id"].as_str().unwrap().to_string();
    let uri = format!("/api/orders/{order_id}");

    let (status, _) = app.get(&uri, Some(&manager)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&uri, Some(&other_employee)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);

    let (status, _) = app.get("/api/orders/unknown", Some(&employee)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_restaurant_order_queue() {
    let app = TestApp::new().await;
    let employee = app.login(EMPLOYEE).await;
    let manager = app.login(MANAGER).await;
    let first = app.place_order(&employee).await["id"].as_str().unwrap().to_string();
    let second = app.place_order(&employee).await["id"].as_str().unwrap().to_string();
    app.advance(&manager, &second, Some("10-15 min")).await;

    let (status, all) = app.get("/api/restaurant/orders", Some(&manager)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, placed) = app.get("/api/restaurant/orders?status=placed", Some(&manager)).await;
    let placed = placed.as_array().unwrap();
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0]["id"], first.as_str());

    let (_, active) = app
        .get("/api/restaurant/orders?status=placed,confirmed", Some(&manager))
        .await;
    assert_eq!(active.as_array().unwrap().len(), 2);

    let (status, body) = app.get("/api/restaurant/orders?status=lost", Some(&manager)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4012);

    let (status, _) = app.get("/api/restaurant/orders", Some(&employee)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let other_manager = app.login(OTHER_MANAGER).await;
    let (_, theirs) = app.get("/api/restaurant/orders", Some(&other_manager)).await;
    assert!(theirs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_tracking_simulation_is_read_only() {
    let app = TestApp::new().await;
    let employee = app.login(EMPLOYEE).await;
    let manager = app.login(MANAGER).await;
    let order_id = app.place_order(&employee).await["id"].as_str().unwrap().to_string();
    app.advance(&manager, &order_id, Some("15-20 min")).await;

    let (status, view) = app
        .get(&format!("/api/orders/{order_id}/tracking?elapsedSecs=65"), Some(&employee))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "confirmed");
    assert_eq!(view["displayStatus"], "ready");
    assert_eq!(view["simulated"], true);

    let (_, view) = app
        .get(&format!("/api/orders/{order_id}/tracking"), Some(&employee))
        .await;
    assert_eq!(view["displayStatus"], "confirmed");
    assert_eq!(view["etaText"], "Ready in 15-20 min");

    let (_, order) = app.get(&format!("/api/orders/{order_id}"), Some(&employee)).await;
    assert_eq!(order["status"], "confirmed");
}

#[tokio::test]
async fn test_tracking_session_lifecycle() {
    let app = TestApp::new().await;
    let employee = app.login(EMPLOYEE).await;
    let other_employee = app.login(OTHER_EMPLOYEE).await;
    let order_id = app.place_order(&employee).await["id"].as_str().unwrap().to_string();

    let (status, opened) = app
        .post(&format!("/api/orders/{order_id}/tracking/sessions"), Some(&employee), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(opened["tracking"]["displayStatus"], "placed");
    let sid = opened["sessionId"].as_str().unwrap().to_string();
    assert_eq!(app.state.tracking.len(), 1);

    let uri = format!("/api/tracking-sessions/{sid}");
    let (status, view) = app.get(&uri, Some(&employee)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["orderId"], order_id.as_str());

    let (status, _) = app.get(&uri, Some(&other_employee)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, closed) = app.request(Method::DELETE, &uri, Some(&employee), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed, true);
    assert!(app.state.tracking.is_empty());

    let (status, _) = app.get(&uri, Some(&employee)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notification_inbox() {
    let app = TestApp::new().await;
    let employee = app.login(EMPLOYEE).await;
    let manager = app.login(MANAGER).await;
    let order = app.place_order(&employee).await;
    let order_id = order["id"].as_str().unwrap();
    let order_number = order["orderNumber"].as_str().unwrap();

    app.advance(&manager, order_id, Some("15-20 min")).await;
    app.advance(&manager, order_id, None).await;

    let (status, inbox) = app.get("/api/notifications", Some(&employee)).await;
    assert_eq!(status, StatusCode::OK);
    let inbox = inbox.as_array().unwrap();
    assert_eq!(inbox.len(), 2);
    let preparing = inbox
        .iter()
        .find(|n| n["status"] == "preparing")
        .expect("preparing notification");
    assert_eq!(preparing["orderId"], order_id);
    assert!(preparing["message"].as_str().unwrap().contains(order_number));

    let first_id = preparing["id"].as_str().unwrap();
    let (status, read) = app
        .post(&format!("/api/notifications/{first_id}/read"), Some(&employee), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["read"], true);

    // 别人的通知不可见
    let other = app.login(OTHER_EMPLOYEE).await;
    let (status, _) = app
        .post(&format!("/api/notifications/{first_id}/read"), Some(&other), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, count) = app.get("/api/notifications/unread-count", Some(&employee)).await;
    assert_eq!(count["unread"], 1);

    let (status, count) = app
        .post("/api/notifications/read-all", Some(&employee), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count["unread"], 0);
}
