use chrono::Utc;
use diesel::{AsChangeset, Connection, ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use uuid::Uuid;

use crate::{domain::status::{AVAILABLE, PICKED_UP}, models::{Delivery, DeliveryPersonnel}, schema::{deliveries, delivery_personnel, orders}, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

use super::{conflict_on_unique_violation, orders::ORDER_NOT_FOUND, require_restaurant, DbError};

pub const DELIVERY_PERSONNEL_NOT_FOUND: &str = "Delivery personnel not found";
pub const DELIVERY_NOT_FOUND: &str = "Delivery not found";
pub const DELIVERY_NOT_AVAILABLE: &str = "Delivery not available";
pub const DELIVERY_EXISTS: &str = "Delivery already exists for order";

#[derive(Debug, Clone)]
pub struct NewDeliveryPersonnelProfile{
    pub name: String,
    pub contact_details: String,
    pub vehicle_type: String
}

// delivery_time is left untouched when None
#[derive(AsChangeset, Debug)]
#[diesel(table_name = deliveries)]
pub struct DeliveryStatusChangeset{
    pub status: String,
    pub delivery_time: Option<i32>
}

pub fn insert_delivery_personnel_profile(
    conn: &mut DbConnection,
    user_id: Uuid,
    profile: NewDeliveryPersonnelProfile
) -> QueryResult<DeliveryPersonnel> {
    let personnel = DeliveryPersonnel{
        id: Uuid::new_v4(),
        user_id,
        name: profile.name,
        contact_details: profile.contact_details,
        vehicle_type: profile.vehicle_type,
        is_available: true
    };

    diesel::insert_into(delivery_personnel::table)
        .values(&personnel)
        .returning(DeliveryPersonnel::as_returning())
        .get_result::<DeliveryPersonnel>(conn)
}

fn require_delivery_personnel(conn: &mut DbConnection, user_id: Uuid) -> Result<DeliveryPersonnel, DbError> {
    delivery_personnel::table
        .filter(delivery_personnel::user_id.eq(user_id))
        .select(DeliveryPersonnel::as_select())
        .first::<DeliveryPersonnel>(conn)
        .optional()?
        .ok_or(DbError::NotFound(DELIVERY_PERSONNEL_NOT_FOUND))
}

// Restaurant hands one of its orders over for delivery
#[tracing::instrument(
    "Creating delivery for order",
    skip(conn)
)]
pub async fn create_delivery_for_order(
    mut conn: DbConnection,
    owner_user_id: Uuid,
    order_id: Uuid
) -> Result<Delivery, DbError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let restaurant = require_restaurant(conn, owner_user_id)?;

            let order_exists = diesel::select(diesel::dsl::exists(
                orders::table
                    .filter(orders::id.eq(order_id))
                    .filter(orders::restaurant_owner_id.eq(restaurant.id))
            ))
            .get_result::<bool>(conn)?;

            if !order_exists {
                return Err(DbError::NotFound(ORDER_NOT_FOUND));
            }

            let delivery = Delivery{
                id: Uuid::new_v4(),
                order_id,
                delivery_personnel_id: None,
                status: AVAILABLE.to_string(),
                delivery_time: None,
                created_at: Utc::now()
            };

            diesel::insert_into(deliveries::table)
                .values(&delivery)
                .returning(Delivery::as_returning())
                .get_result::<Delivery>(conn)
                .map_err(conflict_on_unique_violation(DELIVERY_EXISTS))
        })
    })
    .await?
}

#[tracing::instrument(
    "Getting available deliveries",
    skip(conn)
)]
pub async fn get_available_deliveries(
    mut conn: DbConnection,
    personnel_user_id: Uuid,
    assigned_to: Option<Uuid>
) -> Result<Vec<Delivery>, DbError> {
    spawn_blocking_with_tracing(move || -> Result<Vec<Delivery>, DbError> {
        require_delivery_personnel(&mut conn, personnel_user_id)?;

        let mut query = deliveries::table
            .filter(deliveries::status.eq(AVAILABLE))
            .into_boxed();

        if let Some(delivery_personnel_id) = assigned_to {
            query = query.filter(deliveries::delivery_personnel_id.eq(delivery_personnel_id));
        }

        Ok(query
            .order(deliveries::created_at.asc())
            .select(Delivery::as_select())
            .load::<Delivery>(&mut conn)?)
    })
    .await?
}

/// Claims an available delivery for the caller. The status check and the
/// update are one statement, so of two concurrent accepts only one succeeds.
#[tracing::instrument(
    "Accepting delivery",
    skip(conn)
)]
pub async fn accept_delivery(
    mut conn: DbConnection,
    personnel_user_id: Uuid,
    delivery_id: Uuid
) -> Result<Delivery, DbError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let personnel = require_delivery_personnel(conn, personnel_user_id)?;

            diesel::update(
                deliveries::table
                    .filter(deliveries::id.eq(delivery_id))
                    .filter(deliveries::status.eq(AVAILABLE))
            )
            .set((
                deliveries::status.eq(PICKED_UP),
                deliveries::delivery_personnel_id.eq(Some(personnel.id))
            ))
            .returning(Delivery::as_returning())
            .get_result::<Delivery>(conn)
            .optional()?
            .ok_or(DbError::NotFound(DELIVERY_NOT_AVAILABLE))
        })
    })
    .await?
}

#[tracing::instrument(
    "Updating delivery status",
    skip(conn)
)]
pub async fn update_delivery_status(
    mut conn: DbConnection,
    personnel_user_id: Uuid,
    delivery_id: Uuid,
    changes: DeliveryStatusChangeset
) -> Result<Delivery, DbError> {
    spawn_blocking_with_tracing(move || {
        conn.transaction::<_, DbError, _>(|conn| {
            let personnel = require_delivery_personnel(conn, personnel_user_id)?;

            diesel::update(
                deliveries::table
                    .filter(deliveries::id.eq(delivery_id))
                    .filter(deliveries::delivery_personnel_id.eq(personnel.id))
            )
            .set(&changes)
            .returning(Delivery::as_returning())
            .get_result::<Delivery>(conn)
            .optional()?
            .ok_or(DbError::NotFound(DELIVERY_NOT_FOUND))
        })
    })
    .await?
}

#[tracing::instrument(
    "Setting delivery personnel availability",
    skip(conn)
)]
pub async fn set_delivery_availability(
    mut conn: DbConnection,
    personnel_user_id: Uuid,
    available: bool
) -> Result<DeliveryPersonnel, DbError> {
    spawn_blocking_with_tracing(move || -> Result<DeliveryPersonnel, DbError> {
        diesel::update(delivery_personnel::table.filter(delivery_personnel::user_id.eq(personnel_user_id)))
            .set(delivery_personnel::is_available.eq(available))
            .returning(DeliveryPersonnel::as_returning())
            .get_result::<DeliveryPersonnel>(&mut conn)
            .optional()?
            .ok_or(DbError::NotFound(DELIVERY_PERSONNEL_NOT_FOUND))
    })
    .await?
}
