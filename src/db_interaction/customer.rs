use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl, SelectableHelper};
use uuid::Uuid;

use crate::{models::Customer, schema::customers, utils::DbConnection};

pub const CUSTOMER_NOT_FOUND: &str = "Customer not found";

// Profile fields collected at registration
#[derive(Debug, Clone)]
pub struct NewCustomerProfile{
    pub name: String,
    pub delivery_address: String,
    pub payment_details: String
}

pub fn insert_customer_profile(
    conn: &mut DbConnection,
    user_id: Uuid,
    profile: NewCustomerProfile
) -> QueryResult<Customer> {
    let customer = Customer{
        id: Uuid::new_v4(),
        user_id,
        name: profile.name,
        delivery_address: profile.delivery_address,
        payment_details: profile.payment_details
    };

    diesel::insert_into(customers::table)
        .values(&customer)
        .returning(Customer::as_returning())
        .get_result::<Customer>(conn)
}

pub fn find_customer_by_user_id(conn: &mut DbConnection, user_id: Uuid) -> QueryResult<Option<Customer>> {
    customers::table
        .filter(customers::user_id.eq(user_id))
        .select(Customer::as_select())
        .first::<Customer>(conn)
        .optional()
}
