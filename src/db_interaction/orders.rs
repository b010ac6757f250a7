use chrono::Utc;
use diesel::{Connection, ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use uuid::Uuid;

use crate::{domain::status::PENDING, models::Order, schema::orders, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

use super::{customer::{find_customer_by_user_id, CUSTOMER_NOT_FOUND}, require_restaurant, restaurant::{restaurant_exists, RESTAURANT_NOT_FOUND}, DbError};

pub const ORDER_NOT_FOUND: &str = "Order not found";

fn insert_order(
    conn: &mut DbConnection,
    customer_id: Uuid,
    restaurant_owner_id: Uuid,
    total_amount: i32
) -> QueryResult<Order> {
    let order = Order{
        id: Uuid::new_v4(),
        customer_id,
        restaurant_owner_id,
        status: PENDING.to_string(),
        total_amount,
        created_at: Utc::now()
    };

    diesel::insert_into(orders::table)
        .values(&order)
        .returning(Order::as_returning())
        .get_result::<Order>(conn)
}

fn find_customer_order(conn: &mut DbConnection, customer_user_id: Uuid, order_id: Uuid) -> Result<Order, DbError> {
    let customer = find_customer_by_user_id(conn, customer_user_id)?
        .ok_or(DbError::NotFound(CUSTOMER_NOT_FOUND))?;

    orders::table
        .filter(orders::id.eq(order_id))
        .filter(orders::customer_id.eq(customer.id))
        .select(Order::as_select())
        .first::<Order>(conn)
        .optional()?
        .ok_or(DbError::NotFound(ORDER_NOT_FOUND))
}

#[tracing::instrument(
    "Placing order",
    skip(conn)
)]
pub async fn place_order(
    mut conn: DbConnection,
    customer_user_id: Uuid,
    restaurant_owner_id: Uuid,
    total_amount: i32
) -> Result<Order, DbError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let customer = find_customer_by_user_id(conn, customer_user_id)?
                .ok_or(DbError::NotFound(CUSTOMER_NOT_FOUND))?;

            if !restaurant_exists(conn, restaurant_owner_id)? {
                return Err(DbError::NotFound(RESTAURANT_NOT_FOUND));
            }

            Ok(insert_order(conn, customer.id, restaurant_owner_id, total_amount)?)
        })
    })
    .await?
}

#[tracing::instrument(
    "Getting order of customer",
    skip(conn)
)]
pub async fn get_customer_order(
    mut conn: DbConnection,
    customer_user_id: Uuid,
    order_id: Uuid
) -> Result<Order, DbError> {
    spawn_blocking_with_tracing(move || {
        find_customer_order(&mut conn, customer_user_id, order_id)
    })
    .await?
}

#[tracing::instrument(
    "Getting order history of customer",
    skip(conn)
)]
pub async fn get_customer_orders(
    mut conn: DbConnection,
    customer_user_id: Uuid
) -> Result<Vec<Order>, DbError> {
    spawn_blocking_with_tracing(move || -> Result<Vec<Order>, DbError> {
        let customer = find_customer_by_user_id(&mut conn, customer_user_id)?
            .ok_or(DbError::NotFound(CUSTOMER_NOT_FOUND))?;

        Ok(orders::table
            .filter(orders::customer_id.eq(customer.id))
            .order(orders::created_at.desc())
            .select(Order::as_select())
            .load::<Order>(&mut conn)?)
    })
    .await?
}

// New pending order with the restaurant and total of a previous one
#[tracing::instrument(
    "Reordering previous order",
    skip(conn)
)]
pub async fn reorder(
    mut conn: DbConnection,
    customer_user_id: Uuid,
    order_id: Uuid
) -> Result<Order, DbError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let previous = find_customer_order(conn, customer_user_id, order_id)?;

            Ok(insert_order(conn, previous.customer_id, previous.restaurant_owner_id, previous.total_amount)?)
        })
    })
    .await?
}

#[tracing::instrument(
    "Getting incoming orders of restaurant",
    skip(conn)
)]
pub async fn get_restaurant_orders(
    mut conn: DbConnection,
    owner_user_id: Uuid
) -> Result<Vec<Order>, DbError> {
    spawn_blocking_with_tracing(move || -> Result<Vec<Order>, DbError> {
        let restaurant = require_restaurant(&mut conn, owner_user_id)?;

        Ok(orders::table
            .filter(orders::restaurant_owner_id.eq(restaurant.id))
            .order(orders::created_at.desc())
            .select(Order::as_select())
            .load::<Order>(&mut conn)?)
    })
    .await?
}

#[tracing::instrument(
    "Updating status of restaurant order",
    skip(conn)
)]
pub async fn update_restaurant_order_status(
    mut conn: DbConnection,
    owner_user_id: Uuid,
    order_id: Uuid,
    status: String
) -> Result<Order, DbError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let restaurant = require_restaurant(conn, owner_user_id)?;

            diesel::update(
                orders::table
                    .filter(orders::id.eq(order_id))
                    .filter(orders::restaurant_owner_id.eq(restaurant.id))
            )
            .set(orders::status.eq(status))
            .returning(Order::as_returning())
            .get_result::<Order>(conn)
            .optional()?
            .ok_or(DbError::NotFound(ORDER_NOT_FOUND))
        })
    })
    .await?
}

#[tracing::instrument(
    "Getting all orders",
    skip_all
)]
pub async fn get_all_orders(mut conn: DbConnection) -> Result<Vec<Order>, DbError> {
    Ok(spawn_blocking_with_tracing(move || {
        orders::table
            .order(orders::created_at.desc())
            .select(Order::as_select())
            .load::<Order>(&mut conn)
    })
    .await??)
}

#[tracing::instrument(
    "Updating order status",
    skip(conn)
)]
pub async fn update_order_status(
    mut conn: DbConnection,
    order_id: Uuid,
    status: String
) -> Result<Order, DbError> {
    spawn_blocking_with_tracing(move || -> Result<Order, DbError> {
        diesel::update(orders::table.filter(orders::id.eq(order_id)))
            .set(orders::status.eq(status))
            .returning(Order::as_returning())
            .get_result::<Order>(&mut conn)
            .optional()?
            .ok_or(DbError::NotFound(ORDER_NOT_FOUND))
    })
    .await?
}
