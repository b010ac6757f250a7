use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::{customers, deliveries, delivery_personnel, menus, orders, restaurant_owners, users};

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User{
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub active: bool,
    pub created_at: DateTime<Utc>
}

// Fields left as None are not touched by the update
#[derive(AsChangeset, Default, Debug)]
#[diesel(table_name = users)]
pub struct UserChangeset{
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<String>
}

impl UserChangeset {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password_hash.is_none() && self.role.is_none()
    }
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Customer{
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub delivery_address: String,
    pub payment_details: String
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurant_owners)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RestaurantOwner{
    pub id: Uuid,
    pub user_id: Uuid,
    pub restaurant_name: String,
    pub address: String,
    pub hours_of_operation: String
}

#[derive(AsChangeset, Default, Debug)]
#[diesel(table_name = restaurant_owners)]
pub struct RestaurantOwnerChangeset{
    pub restaurant_name: Option<String>,
    pub address: Option<String>,
    pub hours_of_operation: Option<String>
}

impl RestaurantOwnerChangeset {
    pub fn is_empty(&self) -> bool {
        self.restaurant_name.is_none() && self.address.is_none() && self.hours_of_operation.is_none()
    }
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = menus)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Menu{
    pub id: Uuid,
    pub restaurant_owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub availability: bool
}

#[derive(AsChangeset, Default, Debug)]
#[diesel(table_name = menus)]
pub struct MenuChangeset{
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub availability: Option<bool>
}

impl MenuChangeset {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.availability.is_none()
    }
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order{
    pub id: Uuid,
    pub customer_id: Uuid,
    pub restaurant_owner_id: Uuid,
    pub status: String,
    pub total_amount: i32,
    pub created_at: DateTime<Utc>
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = deliveries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Delivery{
    pub id: Uuid,
    pub order_id: Uuid,
    pub delivery_personnel_id: Option<Uuid>,
    pub status: String,
    pub delivery_time: Option<i32>,
    pub created_at: DateTime<Utc>
}

#[derive(Queryable, Selectable, Insertable, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[diesel(table_name = delivery_personnel)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryPersonnel{
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub contact_details: String,
    pub vehicle_type: String,
    pub is_available: bool
}
