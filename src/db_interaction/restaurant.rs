use diesel::{Connection, ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use uuid::Uuid;

use crate::{models::{RestaurantOwner, RestaurantOwnerChangeset}, schema::restaurant_owners, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

use super::DbError;

pub const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";

#[derive(Debug, Clone)]
pub struct NewRestaurantProfile{
    pub restaurant_name: String,
    pub address: String,
    pub hours_of_operation: String
}

pub fn insert_restaurant_profile(
    conn: &mut DbConnection,
    user_id: Uuid,
    profile: NewRestaurantProfile
) -> QueryResult<RestaurantOwner> {
    let restaurant = RestaurantOwner{
        id: Uuid::new_v4(),
        user_id,
        restaurant_name: profile.restaurant_name,
        address: profile.address,
        hours_of_operation: profile.hours_of_operation
    };

    diesel::insert_into(restaurant_owners::table)
        .values(&restaurant)
        .returning(RestaurantOwner::as_returning())
        .get_result::<RestaurantOwner>(conn)
}

pub fn find_restaurant_by_user_id(conn: &mut DbConnection, user_id: Uuid) -> QueryResult<Option<RestaurantOwner>> {
    restaurant_owners::table
        .filter(restaurant_owners::user_id.eq(user_id))
        .select(RestaurantOwner::as_select())
        .first::<RestaurantOwner>(conn)
        .optional()
}

// Restaurant owned by the token subject, NotFound when the profile is missing
pub fn require_restaurant(conn: &mut DbConnection, user_id: Uuid) -> Result<RestaurantOwner, DbError> {
    find_restaurant_by_user_id(conn, user_id)?
        .ok_or(DbError::NotFound(RESTAURANT_NOT_FOUND))
}

pub fn restaurant_exists(conn: &mut DbConnection, restaurant_id: Uuid) -> QueryResult<bool> {
    diesel::select(diesel::dsl::exists(
        restaurant_owners::table.filter(restaurant_owners::id.eq(restaurant_id))
    ))
    .get_result::<bool>(conn)
}

#[tracing::instrument(
    "Listing restaurants",
    skip_all
)]
pub async fn list_restaurants(mut conn: DbConnection) -> Result<Vec<RestaurantOwner>, DbError> {
    Ok(spawn_blocking_with_tracing(move || {
        restaurant_owners::table
            .order(restaurant_owners::restaurant_name.asc())
            .select(RestaurantOwner::as_select())
            .load::<RestaurantOwner>(&mut conn)
    })
    .await??)
}

#[tracing::instrument(
    "Updating restaurant details",
    skip(conn, changes)
)]
pub async fn update_restaurant_details(
    mut conn: DbConnection,
    owner_user_id: Uuid,
    changes: RestaurantOwnerChangeset
) -> Result<RestaurantOwner, DbError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let restaurant = require_restaurant(conn, owner_user_id)?;

            if changes.is_empty() {
                return Ok(restaurant);
            }

            Ok(diesel::update(restaurant_owners::table.filter(restaurant_owners::id.eq(restaurant.id)))
                .set(&changes)
                .returning(RestaurantOwner::as_returning())
                .get_result::<RestaurantOwner>(conn)?)
        })
    })
    .await?
}
