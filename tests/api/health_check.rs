use crate::helpers::{detail, TestApp};

#[actix_web::test]
async fn health_check_reports_working_database(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/health", None).await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "Working");
}

#[actix_web::test]
async fn malformed_path_id_returns_json_detail(){
    let app = TestApp::spawn_app().await;
    let customer = app.register_customer().await;

    let response = app.get("/customers/order/not-a-uuid", Some(&customer.token)).await;
    assert_eq!(response.status().as_u16(), 404);
    assert!(!detail(response).await.is_empty());

    let response = app.get("/customers/restaurants/not-a-uuid/menu", None).await;
    assert_eq!(response.status().as_u16(), 404);
    assert!(!detail(response).await.is_empty());
}

#[actix_web::test]
async fn preflight_request_is_allowed_from_any_origin(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client
        .request(reqwest::Method::OPTIONS, format!("{}/customers/restaurants", app.get_app_url()))
        .header("Origin", "http://frontend.local")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers().get("Access-Control-Allow-Origin").unwrap(),
        "http://frontend.local"
    );
}
