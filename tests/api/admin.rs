use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use food_delivery::{db_interaction::insert_admin_if_missing, models::User, schema::users};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::helpers::{detail, TestApp};

#[actix_web::test]
async fn admin_creates_user_and_duplicate_is_rejected(){
    let app = TestApp::spawn_app().await;
    let token = app.admin_token().await;

    let body = json!({ "username": "support_agent", "password": "agent-password", "role": "admin" });

    let response = app.post_json("/admins/users/create", &body, Some(&token)).await;
    assert_eq!(response.status().as_u16(), 200);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["role"], "administrator");

    let response = app.post_json("/admins/users/create", &body, Some(&token)).await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(detail(response).await, "User already exists");

    let response = app.post_json(
        "/admins/users/create",
        &json!({ "username": "chef", "password": "chef-password", "role": "chef" }),
        Some(&token)
    ).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn admin_updates_user(){
    let app = TestApp::spawn_app().await;
    let token = app.admin_token().await;
    let customer = app.register_customer().await;

    let response = app.put_json(
        &format!("/admins/users/{}", customer.user_id),
        &json!({ "username": "renamed_customer", "password": "brand-new-password" }),
        Some(&token)
    ).await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["username"], "renamed_customer");

    app.login("/customers/login", "renamed_customer", "brand-new-password").await;

    let response = app.put_json(
        &format!("/admins/users/{}", customer.user_id),
        &json!({ "username": &app.admin_username }),
        Some(&token)
    ).await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.put_json(&format!("/admins/users/{}", Uuid::new_v4()), &json!({ "role": "customer" }), Some(&token)).await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(detail(response).await, "User not found");
}

#[actix_web::test]
async fn deactivation_keeps_the_record(){
    let app = TestApp::spawn_app().await;
    let token = app.admin_token().await;
    let customer = app.register_customer().await;

    let response = app.delete(&format!("/admins/users/{}", customer.user_id), Some(&token)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["active"], false);

    let mut conn = app.pool.get().unwrap();
    let stored = users::table
        .filter(users::id.eq(customer.user_id))
        .first::<User>(&mut conn)
        .expect("Deactivated user was deleted");
    assert!(!stored.active);

    let response = app.delete(&format!("/admins/users/{}", Uuid::new_v4()), Some(&token)).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn admin_overrides_order_status(){
    let app = TestApp::spawn_app().await;
    let token = app.admin_token().await;
    let (_, restaurant_id) = app.register_restaurant_owner("Grill House").await;
    let customer = app.register_customer().await;
    let order_id = app.place_order(&customer, restaurant_id, 2000).await;

    let orders: Value = app.get("/admins/orders", Some(&token)).await.json().await.unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 1);

    let response = app.put_json(&format!("/admins/orders/{}", order_id), &json!({ "status": "cancelled" }), Some(&token)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], format!("Order {} updated to cancelled", order_id));

    let tracked: Value = app.get(&format!("/customers/order/{}", order_id), Some(&customer.token)).await
        .json().await.unwrap();
    assert_eq!(tracked["status"], "cancelled");

    let response = app.put_json(&format!("/admins/orders/{}", Uuid::new_v4()), &json!({ "status": "cancelled" }), Some(&token)).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn reports_aggregate_orders_and_deliveries(){
    let app = TestApp::spawn_app().await;
    let token = app.admin_token().await;
    let (owner, busy_id) = app.register_restaurant_owner("Busy Bistro").await;
    let (_, quiet_id) = app.register_restaurant_owner("Quiet Cafe").await;
    let customer = app.register_customer().await;
    let courier = app.register_delivery_personnel().await;

    let first = app.place_order(&customer, busy_id, 1000).await;
    app.place_order(&customer, busy_id, 1200).await;
    app.place_order(&customer, quiet_id, 800).await;

    let delivery_id = app.request_delivery(&owner, first).await;
    app.put_json(&format!("/delivery_personnel/deliveries/{}", delivery_id), &json!({}), Some(&courier.token)).await;
    app.put_json(
        &format!("/delivery_personnel/deliveries/status/{}", delivery_id),
        &json!({ "status": "delivered", "delivery_time": 30 }),
        Some(&courier.token)
    ).await;
    app.put_json(&format!("/admins/orders/{}", first), &json!({ "status": "delivered" }), Some(&token)).await;

    let popular: Value = app.get("/admins/reports/popular_restaurants", Some(&token)).await.json().await.unwrap();
    assert_eq!(popular["report_type"], "popular_restaurants");
    assert_eq!(popular["data"][0]["restaurant_name"], "Busy Bistro");
    assert_eq!(popular["data"][0]["order_count"], 2);
    assert_eq!(popular["data"][1]["order_count"], 1);

    let average: Value = app.get("/admins/reports/average_delivery_time", Some(&token)).await.json().await.unwrap();
    assert_eq!(average["data"], 30.0);

    let trends: Value = app.get("/admins/reports/order_trends", Some(&token)).await.json().await.unwrap();
    assert_eq!(trends["data"], json!([
        { "status": "delivered", "order_count": 1 },
        { "status": "pending", "order_count": 2 }
    ]));

    let response = app.get("/admins/reports/revenue", Some(&token)).await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(detail(response).await, "Invalid report type");

    let activity: Value = app.get("/admins/activity", Some(&token)).await.json().await.unwrap();
    assert_eq!(activity, json!({
        "active_users": 4,
        "orders_in_progress": 2,
        "completed_orders": 1,
        "total_deliveries": 1
    }));
}

#[actix_web::test]
async fn average_delivery_time_is_null_without_timed_deliveries(){
    let app = TestApp::spawn_app().await;
    let token = app.admin_token().await;

    let average: Value = app.get("/admins/reports/average_delivery_time", Some(&token)).await.json().await.unwrap();

    assert!(average["data"].is_null());
}

#[actix_web::test]
async fn bootstrap_admin_skips_taken_username(){
    let app = TestApp::spawn_app().await;
    let customer = app.register_customer().await;

    let conn = app.pool.get().unwrap();
    let inserted = insert_admin_if_missing(conn, customer.username.clone(), "unused-hash".to_string()).await.unwrap();
    assert!(!inserted);

    let conn = app.pool.get().unwrap();
    let inserted = insert_admin_if_missing(conn, app.admin_username.clone(), "unused-hash".to_string()).await.unwrap();
    assert!(!inserted);

    app.login("/customers/login", &customer.username, &customer.password).await;
    app.admin_token().await;

    let mut conn = app.pool.get().unwrap();
    let stored = users::table
        .filter(users::id.eq(customer.user_id))
        .first::<User>(&mut conn)
        .unwrap();
    assert_eq!(stored.role, "customer");
}
