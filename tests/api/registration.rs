use serde_json::json;

use crate::helpers::{detail, TestApp};

#[actix_web::test]
async fn customer_registration_returns_user_and_profile(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/customers/register", &json!({
        "username": "jane_doe",
        "password": "secret-password",
        "name": "Jane Doe",
        "delivery_address": "12 Elm Street",
        "payment_details": "visa"
    }), None).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user"]["username"], "jane_doe");
    assert_eq!(body["user"]["role"], "customer");
    assert_eq!(body["user"]["active"], true);
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(body["profile"]["delivery_address"], "12 Elm Street");
    assert_eq!(body["profile"]["user_id"], body["user"]["id"]);
}

#[actix_web::test]
async fn duplicate_username_is_rejected_across_roles(){
    let app = TestApp::spawn_app().await;
    let customer = app.register_customer().await;

    let response = app.post_json("/restaurant_owners/register", &json!({
        "username": customer.username,
        "password": "another-password",
        "restaurant_name": "Copycat Diner",
        "address": "3 High Street",
        "hours_of_operation": "all day"
    }), None).await;

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(detail(response).await, "User already exists");

    let restaurants: serde_json::Value = app.get("/customers/restaurants", None).await.json().await.unwrap();
    assert!(restaurants.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn invalid_registration_fields_are_rejected(){
    let app = TestApp::spawn_app().await;

    let test_cases = vec![
        (json!({
            "username": "has space", "password": "password", "name": "n",
            "contact_details": "c", "vehicle_type": "car"
        }), "invalid username"),
        (json!({
            "username": "courier", "password": "", "name": "n",
            "contact_details": "c", "vehicle_type": "car"
        }), "empty password"),
        (json!({
            "username": "courier", "password": "password", "name": "  ",
            "contact_details": "c", "vehicle_type": "car"
        }), "blank name"),
        (json!({
            "username": "courier", "password": "password"
        }), "missing profile fields"),
    ];

    for (body, description) in test_cases {
        let response = app.post_json("/delivery_personnel/register", &body, None).await;

        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not fail with 400 Bad Request when the payload had {}",
            description
        );
    }
}
