use diesel::{Connection, ExpressionMethods, OptionalExtension, PgTextExpressionMethods, QueryDsl, RunQueryDsl, SelectableHelper};
use uuid::Uuid;

use crate::{models::{Menu, MenuChangeset}, schema::menus, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

use super::{require_restaurant, DbError};

pub const MENU_ITEM_NOT_FOUND: &str = "Menu item not found";

#[derive(Debug, Clone)]
pub struct NewMenuItem{
    pub name: String,
    pub description: String,
    pub price: i32,
    pub availability: bool
}

// Escapes LIKE wildcards so the query matches literally
pub fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[tracing::instrument(
    "Getting menu of restaurant",
    skip(conn)
)]
pub async fn get_restaurant_menu(
    mut conn: DbConnection,
    restaurant_id: Uuid
) -> Result<Vec<Menu>, DbError> {
    Ok(spawn_blocking_with_tracing(move || {
        menus::table
            .filter(menus::restaurant_owner_id.eq(restaurant_id))
            .order(menus::name.asc())
            .select(Menu::as_select())
            .load::<Menu>(&mut conn)
    })
    .await??)
}

#[tracing::instrument(
    "Searching menu items by name",
    skip(conn)
)]
pub async fn search_menu_items(
    mut conn: DbConnection,
    query: String
) -> Result<Vec<Menu>, DbError> {
    let pattern = like_pattern(&query);

    Ok(spawn_blocking_with_tracing(move || {
        menus::table
            .filter(menus::name.ilike(pattern))
            .order(menus::name.asc())
            .select(Menu::as_select())
            .load::<Menu>(&mut conn)
    })
    .await??)
}

#[tracing::instrument(
    "Inserting menu item",
    skip(conn)
)]
pub async fn create_menu_item(
    mut conn: DbConnection,
    owner_user_id: Uuid,
    item: NewMenuItem
) -> Result<Menu, DbError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let restaurant = require_restaurant(conn, owner_user_id)?;

            let menu = Menu{
                id: Uuid::new_v4(),
                restaurant_owner_id: restaurant.id,
                name: item.name,
                description: item.description,
                price: item.price,
                availability: item.availability
            };

            Ok(diesel::insert_into(menus::table)
                .values(&menu)
                .returning(Menu::as_returning())
                .get_result::<Menu>(conn)?)
        })
    })
    .await?
}

#[tracing::instrument(
    "Updating menu item",
    skip(conn, changes)
)]
pub async fn update_menu_item(
    mut conn: DbConnection,
    owner_user_id: Uuid,
    menu_id: Uuid,
    changes: MenuChangeset
) -> Result<Menu, DbError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let restaurant = require_restaurant(conn, owner_user_id)?;
            let target = menus::table
                .filter(menus::id.eq(menu_id))
                .filter(menus::restaurant_owner_id.eq(restaurant.id));

            if changes.is_empty() {
                return target
                    .select(Menu::as_select())
                    .first::<Menu>(conn)
                    .optional()?
                    .ok_or(DbError::NotFound(MENU_ITEM_NOT_FOUND));
            }

            diesel::update(target)
                .set(&changes)
                .returning(Menu::as_returning())
                .get_result::<Menu>(conn)
                .optional()?
                .ok_or(DbError::NotFound(MENU_ITEM_NOT_FOUND))
        })
    })
    .await?
}

#[tracing::instrument(
    "Deleting menu item",
    skip(conn)
)]
pub async fn delete_menu_item(
    mut conn: DbConnection,
    owner_user_id: Uuid,
    menu_id: Uuid
) -> Result<Menu, DbError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let restaurant = require_restaurant(conn, owner_user_id)?;

            diesel::delete(
                menus::table
                    .filter(menus::id.eq(menu_id))
                    .filter(menus::restaurant_owner_id.eq(restaurant.id))
            )
            .returning(Menu::as_returning())
            .get_result::<Menu>(conn)
            .optional()?
            .ok_or(DbError::NotFound(MENU_ITEM_NOT_FOUND))
        })
    })
    .await?
}
