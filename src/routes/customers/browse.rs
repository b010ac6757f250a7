use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{db_interaction::{get_restaurant_menu, list_restaurants, search_menu_items}, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct SearchQuery{
    pub query: String
}

#[tracing::instrument(
    "Browsing restaurants",
    skip(pool)
)]
pub async fn browse_restaurants(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;

    Ok(HttpResponse::Ok().json(list_restaurants(conn).await?))
}

#[tracing::instrument(
    "Viewing restaurant menu",
    skip(pool)
)]
pub async fn view_menu(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    let menu = get_restaurant_menu(conn, path.into_inner()).await?;

    if menu.is_empty() {
        return Err(ApiError::NotFound("Menu not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(menu))
}

#[tracing::instrument(
    "Searching menu",
    skip(pool)
)]
pub async fn search_menu(
    pool: web::Data<DbPool>,
    query: web::Query<SearchQuery>
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner().query.trim().to_string();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let conn = get_pooled_connection(&pool).await?;
    let items = search_menu_items(conn, query).await?;

    if items.is_empty() {
        return Err(ApiError::NotFound("No items found".to_string()));
    }

    Ok(HttpResponse::Ok().json(items))
}
