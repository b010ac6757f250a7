use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::extractors::IsRestaurantOwner, db_interaction::{create_menu_item, delete_menu_item, update_menu_item, NewMenuItem}, domain::{Amount, RequiredText}, models::MenuChangeset, routes::ApiError, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct MenuItemRequest{
    pub name: String,
    pub description: String,
    pub price: i32,
    #[serde(default = "default_availability")]
    pub availability: bool
}

fn default_availability() -> bool {
    true
}

#[derive(Deserialize, Debug, Default)]
pub struct MenuItemUpdate{
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub availability: Option<bool>
}

impl TryFrom<MenuItemUpdate> for MenuChangeset {
    type Error = String;

    fn try_from(update: MenuItemUpdate) -> Result<Self, Self::Error> {
        Ok(MenuChangeset{
            name: update.name.map(|n| RequiredText::parse("name", n).map(RequiredText::inner)).transpose()?,
            description: update.description
                .map(|d| RequiredText::parse("description", d).map(RequiredText::inner))
                .transpose()?,
            price: update.price.map(|p| Amount::parse("price", p).map(|a| a.inner())).transpose()?,
            availability: update.availability
        })
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Message{
    pub msg: String
}

#[tracing::instrument(
    "Adding menu item",
    skip(pool, owner)
)]
pub async fn add_menu_item(
    pool: web::Data<DbPool>,
    body: web::Json<MenuItemRequest>,
    owner: IsRestaurantOwner
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();

    let item = NewMenuItem{
        name: RequiredText::parse("name", body.name).map_err(ApiError::BadRequest)?.inner(),
        description: RequiredText::parse("description", body.description).map_err(ApiError::BadRequest)?.inner(),
        price: Amount::parse("price", body.price).map_err(ApiError::BadRequest)?.inner(),
        availability: body.availability
    };

    let conn = get_pooled_connection(&pool).await?;
    let menu = create_menu_item(conn, owner.0, item).await?;

    Ok(HttpResponse::Ok().json(menu))
}

#[tracing::instrument(
    "Editing menu item",
    skip(pool, owner)
)]
pub async fn edit_menu_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<MenuItemUpdate>,
    owner: IsRestaurantOwner
) -> Result<HttpResponse, ApiError> {
    let changes = MenuChangeset::try_from(body.into_inner()).map_err(ApiError::BadRequest)?;

    let conn = get_pooled_connection(&pool).await?;
    let menu = update_menu_item(conn, owner.0, path.into_inner(), changes).await?;

    Ok(HttpResponse::Ok().json(menu))
}

#[tracing::instrument(
    "Removing menu item",
    skip(pool, owner)
)]
pub async fn remove_menu_item(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    owner: IsRestaurantOwner
) -> Result<HttpResponse, ApiError> {
    let conn = get_pooled_connection(&pool).await?;
    delete_menu_item(conn, owner.0, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(Message{
        msg: "Menu item deleted successfully".to_string()
    }))
}
