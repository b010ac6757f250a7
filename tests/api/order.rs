use serde_json::{json, Value};
use uuid::Uuid;

use crate::helpers::{detail, TestApp};

#[actix_web::test]
async fn customer_places_and_tracks_order(){
    let app = TestApp::spawn_app().await;
    let (_, restaurant_id) = app.register_restaurant_owner("Burger Joint").await;
    let customer = app.register_customer().await;

    let order_id = app.place_order(&customer, restaurant_id, 1599).await;

    let response = app.get(&format!("/customers/order/{}", order_id), Some(&customer.token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["order_id"], json!(order_id));
    assert_eq!(body["status"], "pending");
}

#[actix_web::test]
async fn order_for_unknown_restaurant_is_not_found(){
    let app = TestApp::spawn_app().await;
    let customer = app.register_customer().await;

    let response = app.post_json(
        "/customers/order",
        &json!({ "restaurant_owner_id": Uuid::new_v4(), "total_amount": 100 }),
        Some(&customer.token)
    ).await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(detail(response).await, "Restaurant not found");
}

#[actix_web::test]
async fn negative_total_is_rejected(){
    let app = TestApp::spawn_app().await;
    let (_, restaurant_id) = app.register_restaurant_owner("Taco Stand").await;
    let customer = app.register_customer().await;

    let response = app.post_json(
        "/customers/order",
        &json!({ "restaurant_owner_id": restaurant_id, "total_amount": -5 }),
        Some(&customer.token)
    ).await;

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn tracking_unknown_or_foreign_order_is_not_found(){
    let app = TestApp::spawn_app().await;
    let (_, restaurant_id) = app.register_restaurant_owner("Sushi Bar").await;
    let customer = app.register_customer().await;
    let other_customer = app.register_customer().await;
    let order_id = app.place_order(&customer, restaurant_id, 2500).await;

    let response = app.get(&format!("/customers/order/{}", Uuid::new_v4()), Some(&customer.token)).await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(detail(response).await, "Order not found");

    let response = app.get(&format!("/customers/order/{}", order_id), Some(&other_customer.token)).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn order_history_lists_newest_first_and_reorder_copies_order(){
    let app = TestApp::spawn_app().await;
    let (_, restaurant_id) = app.register_restaurant_owner("Bakery").await;
    let customer = app.register_customer().await;

    let response = app.get("/customers/order-history", Some(&customer.token)).await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(detail(response).await, "No past orders found");

    let first = app.place_order(&customer, restaurant_id, 450).await;

    let response = app.post_json(&format!("/customers/reorder/{}", first), &json!({}), Some(&customer.token)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "Order reordered successfully");
    let second = body["order_id"].clone();
    assert_ne!(second, json!(first));

    let history: Value = app.get("/customers/order-history", Some(&customer.token)).await.json().await.unwrap();
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["id"], second);
    assert_eq!(history[0]["total_amount"], 450);
    assert_eq!(history[0]["restaurant_owner_id"], json!(restaurant_id));

    let response = app.post_json(&format!("/customers/reorder/{}", Uuid::new_v4()), &json!({}), Some(&customer.token)).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn restaurant_status_update_is_visible_to_customer(){
    let app = TestApp::spawn_app().await;
    let (owner, restaurant_id) = app.register_restaurant_owner("Pho Shop").await;
    let customer = app.register_customer().await;
    let order_id = app.place_order(&customer, restaurant_id, 1100).await;

    let incoming: Value = app.get("/restaurant_owners/orders", Some(&owner.token)).await.json().await.unwrap();
    assert_eq!(incoming[0]["id"], json!(order_id));

    let response = app.put_json(
        &format!("/restaurant_owners/orders/{}", order_id),
        &json!({ "status": "preparing" }),
        Some(&owner.token)
    ).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "Order status updated");

    let tracked: Value = app.get(&format!("/customers/order/{}", order_id), Some(&customer.token)).await
        .json().await.unwrap();
    assert_eq!(tracked["status"], "preparing");
}

#[actix_web::test]
async fn restaurant_without_orders_gets_not_found(){
    let app = TestApp::spawn_app().await;
    let (owner, _) = app.register_restaurant_owner("Quiet Cafe").await;

    let response = app.get("/restaurant_owners/orders", Some(&owner.token)).await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(detail(response).await, "No orders found");

    let response = app.put_json(
        &format!("/restaurant_owners/orders/{}", Uuid::new_v4()),
        &json!({ "status": "ready" }),
        Some(&owner.token)
    ).await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(detail(response).await, "Order not found");
}
