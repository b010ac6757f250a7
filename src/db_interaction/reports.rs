use std::collections::HashMap;

use diesel::{dsl::count, ExpressionMethods, QueryDsl, RunQueryDsl};
use serde::Serialize;
use uuid::Uuid;

use crate::{domain::{status::DELIVERED, UserRole}, schema::{deliveries, orders, restaurant_owners, users}, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

use super::DbError;

const POPULAR_RESTAURANT_LIMIT: usize = 5;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PopularRestaurant{
    pub restaurant_owner_id: Uuid,
    pub restaurant_name: String,
    pub order_count: i64
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OrderTrend{
    pub status: String,
    pub order_count: i64
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ActivityReport{
    pub active_users: i64,
    pub orders_in_progress: i64,
    pub completed_orders: i64,
    pub total_deliveries: i64
}

/// Highest order count first, ties broken by name, at most five entries.
/// Restaurants missing from `names` are skipped.
pub fn rank_restaurants(counts: Vec<(Uuid, i64)>, names: Vec<(Uuid, String)>) -> Vec<PopularRestaurant> {
    let names: HashMap<Uuid, String> = names.into_iter().collect();

    let mut ranked: Vec<PopularRestaurant> = counts
        .into_iter()
        .filter_map(|(id, order_count)| {
            names.get(&id).map(|name| PopularRestaurant{
                restaurant_owner_id: id,
                restaurant_name: name.clone(),
                order_count
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.order_count
            .cmp(&a.order_count)
            .then_with(|| a.restaurant_name.cmp(&b.restaurant_name))
    });
    ranked.truncate(POPULAR_RESTAURANT_LIMIT);
    ranked
}

pub fn mean(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let sum: i64 = values.iter().map(|v| *v as i64).sum();
    Some(sum as f64 / values.len() as f64)
}

#[tracing::instrument(
    "Computing popular restaurants report",
    skip_all
)]
pub async fn popular_restaurants(mut conn: DbConnection) -> Result<Vec<PopularRestaurant>, DbError> {
    spawn_blocking_with_tracing(move || -> Result<Vec<PopularRestaurant>, DbError> {
        let counts = orders::table
            .group_by(orders::restaurant_owner_id)
            .select((orders::restaurant_owner_id, count(orders::id)))
            .load::<(Uuid, i64)>(&mut conn)?;

        let ids: Vec<Uuid> = counts.iter().map(|(id, _)| *id).collect();
        let names = restaurant_owners::table
            .filter(restaurant_owners::id.eq_any(ids))
            .select((restaurant_owners::id, restaurant_owners::restaurant_name))
            .load::<(Uuid, String)>(&mut conn)?;

        Ok(rank_restaurants(counts, names))
    })
    .await?
}

#[tracing::instrument(
    "Computing average delivery time report",
    skip_all
)]
pub async fn average_delivery_time(mut conn: DbConnection) -> Result<Option<f64>, DbError> {
    let times = spawn_blocking_with_tracing(move || {
        deliveries::table
            .filter(deliveries::delivery_time.is_not_null())
            .select(deliveries::delivery_time)
            .load::<Option<i32>>(&mut conn)
    })
    .await??;

    let times: Vec<i32> = times.into_iter().flatten().collect();
    Ok(mean(&times))
}

#[tracing::instrument(
    "Computing order trends report",
    skip_all
)]
pub async fn order_trends(mut conn: DbConnection) -> Result<Vec<OrderTrend>, DbError> {
    let rows = spawn_blocking_with_tracing(move || {
        orders::table
            .group_by(orders::status)
            .select((orders::status, count(orders::id)))
            .order(orders::status.asc())
            .load::<(String, i64)>(&mut conn)
    })
    .await??;

    Ok(rows
        .into_iter()
        .map(|(status, order_count)| OrderTrend{ status, order_count })
        .collect())
}

#[tracing::instrument(
    "Computing activity report",
    skip_all
)]
pub async fn activity_report(mut conn: DbConnection) -> Result<ActivityReport, DbError> {
    spawn_blocking_with_tracing(move || -> Result<ActivityReport, DbError> {
        let active_users = users::table
            .filter(users::active.eq(true))
            .filter(users::role.ne(UserRole::Administrator.as_str()))
            .count()
            .get_result::<i64>(&mut conn)?;

        let orders_in_progress = orders::table
            .filter(orders::status.ne(DELIVERED))
            .count()
            .get_result::<i64>(&mut conn)?;

        let completed_orders = orders::table
            .filter(orders::status.eq(DELIVERED))
            .count()
            .get_result::<i64>(&mut conn)?;

        let total_deliveries = deliveries::table
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(ActivityReport{
            active_users,
            orders_in_progress,
            completed_orders,
            total_deliveries
        })
    })
    .await?
}
