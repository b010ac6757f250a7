use chrono::Utc;
use food_delivery::{auth::jwt::Tokenizer, models::User};
use serde_json::json;

use crate::helpers::{detail, TestApp};

#[actix_web::test]
async fn login_with_correct_credentials_returns_bearer_token(){
    let app = TestApp::spawn_app().await;
    let customer = app.register_customer().await;

    let response = app.post_login("/login", &customer.username, &customer.password).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["token_type"], "bearer");

    let claims = app.tokenizer.decode_key(body["access_token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, customer.user_id);
    assert_eq!(claims.username, customer.username);
}

#[actix_web::test]
async fn wrong_password_or_unknown_user_is_rejected(){
    let app = TestApp::spawn_app().await;
    let customer = app.register_customer().await;

    let response = app.post_login("/customers/login", &customer.username, "not-the-password").await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(detail(response).await, "Invalid credentials");

    let response = app.post_login("/customers/login", "nobody_here", "whatever").await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(detail(response).await, "Invalid credentials");
}

#[actix_web::test]
async fn group_login_requires_matching_role(){
    let app = TestApp::spawn_app().await;
    let customer = app.register_customer().await;

    let response = app.post_login("/restaurant_owners/login", &customer.username, &customer.password).await;

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn missing_or_invalid_token_is_unauthorized(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/customers/order-history", None).await;
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(detail(response).await, "Token is invalid");

    let response = app.get("/customers/order-history", Some("not.a.token")).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[actix_web::test]
async fn expired_token_is_unauthorized(){
    let app = TestApp::spawn_app().await;
    let customer = app.register_customer().await;

    let expired = Tokenizer{ expiry_minutes: -10, ..app.tokenizer.clone() };
    let token = expired.generate_key(&User{
        id: customer.user_id,
        username: customer.username.clone(),
        password_hash: String::new(),
        role: "customer".to_string(),
        active: true,
        created_at: Utc::now()
    }).unwrap();

    let response = app.get("/customers/order-history", Some(&token)).await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(detail(response).await, "Token has expired");
}

#[actix_web::test]
async fn token_of_another_role_is_forbidden(){
    let app = TestApp::spawn_app().await;
    let customer = app.register_customer().await;

    let response = app.get("/admins/users", Some(&customer.token)).await;

    assert_eq!(response.status().as_u16(), 403);
}

#[actix_web::test]
async fn deactivated_user_cannot_log_in(){
    let app = TestApp::spawn_app().await;
    let admin_token = app.admin_token().await;
    let customer = app.register_customer().await;

    let response = app.delete(&format!("/admins/users/{}", customer.user_id), Some(&admin_token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.post_login("/login", &customer.username, &customer.password).await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(detail(response).await, "User is deactivated");
}

#[actix_web::test]
async fn malformed_login_form_is_a_bad_request(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client
        .post(format!("{}/login", app.get_app_url()))
        .form(&json!({ "username": "only_username" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}
