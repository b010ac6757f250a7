use serde_json::{json, Value};
use uuid::Uuid;

use crate::helpers::{detail, TestApp};

#[actix_web::test]
async fn owner_adds_menu_item_visible_to_customers(){
    let app = TestApp::spawn_app().await;
    let (owner, restaurant_id) = app.register_restaurant_owner("Pizza Place").await;

    let response = app.post_json("/restaurant_owners/menu", &json!({
        "name": "Margherita",
        "description": "Tomato, mozzarella, basil",
        "price": 950
    }), Some(&owner.token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let created: Value = response.json().await.unwrap();
    assert_eq!(created["availability"], true);
    assert_eq!(created["restaurant_owner_id"], json!(restaurant_id));

    let menu: Value = app.get(&format!("/customers/restaurants/{}/menu", restaurant_id), None).await
        .json().await.unwrap();
    assert_eq!(menu.as_array().unwrap().len(), 1);
    assert_eq!(menu[0]["name"], "Margherita");
    assert_eq!(menu[0]["price"], 950);
}

#[actix_web::test]
async fn menu_of_unknown_restaurant_is_not_found(){
    let app = TestApp::spawn_app().await;

    let response = app.get(&format!("/customers/restaurants/{}/menu", Uuid::new_v4()), None).await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(detail(response).await, "Menu not found");
}

#[actix_web::test]
async fn search_matches_names_case_insensitively(){
    let app = TestApp::spawn_app().await;
    let (owner, _) = app.register_restaurant_owner("Noodle Bar").await;

    for name in ["Spicy Ramen", "Miso Ramen", "Gyoza"] {
        let response = app.post_json("/restaurant_owners/menu", &json!({
            "name": name, "description": "house special", "price": 1200
        }), Some(&owner.token)).await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let results: Value = app.get("/customers/search-menu?query=ramen", None).await.json().await.unwrap();
    assert_eq!(results.as_array().unwrap().len(), 2);

    let response = app.get("/customers/search-menu?query=sushi", None).await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(detail(response).await, "No items found");

    let response = app.get("/customers/search-menu?query=%20", None).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn owner_updates_and_deletes_menu_item(){
    let app = TestApp::spawn_app().await;
    let (owner, _) = app.register_restaurant_owner("Curry House").await;

    let created: Value = app.post_json("/restaurant_owners/menu", &json!({
        "name": "Dal", "description": "Lentils", "price": 700
    }), Some(&owner.token)).await.json().await.unwrap();
    let menu_id = created["id"].as_str().unwrap();

    let response = app.put_json(
        &format!("/restaurant_owners/menu/{}", menu_id),
        &json!({ "price": 750, "availability": false }),
        Some(&owner.token)
    ).await;
    assert_eq!(response.status().as_u16(), 200);

    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["price"], 750);
    assert_eq!(updated["availability"], false);
    assert_eq!(updated["name"], "Dal");

    let response = app.delete(&format!("/restaurant_owners/menu/{}", menu_id), Some(&owner.token)).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "Menu item deleted successfully");

    let response = app.delete(&format!("/restaurant_owners/menu/{}", menu_id), Some(&owner.token)).await;
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(detail(response).await, "Menu item not found");
}

#[actix_web::test]
async fn owner_cannot_edit_another_restaurants_item(){
    let app = TestApp::spawn_app().await;
    let (owner, _) = app.register_restaurant_owner("First Kitchen").await;
    let (other_owner, _) = app.register_restaurant_owner("Second Kitchen").await;

    let created: Value = app.post_json("/restaurant_owners/menu", &json!({
        "name": "Soup", "description": "Of the day", "price": 500
    }), Some(&owner.token)).await.json().await.unwrap();

    let response = app.put_json(
        &format!("/restaurant_owners/menu/{}", created["id"].as_str().unwrap()),
        &json!({ "name": "Stolen Soup" }),
        Some(&other_owner.token)
    ).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn negative_price_is_rejected(){
    let app = TestApp::spawn_app().await;
    let (owner, _) = app.register_restaurant_owner("Cheap Eats").await;

    let response = app.post_json("/restaurant_owners/menu", &json!({
        "name": "Free Lunch", "description": "Too good", "price": -1
    }), Some(&owner.token)).await;

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn owner_updates_restaurant_details(){
    let app = TestApp::spawn_app().await;
    let (owner, _) = app.register_restaurant_owner("Old Name").await;

    let response = app.put_json("/restaurant_owners/restaurant", &json!({
        "restaurant_name": "New Name"
    }), Some(&owner.token)).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["msg"], "Restaurant details updated");
    assert_eq!(body["restaurant_name"], "New Name");
}
